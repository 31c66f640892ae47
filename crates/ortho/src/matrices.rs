//! Matrix operations with explicit outputs.
//!
//! Like the functions in [`vectors`], these read their operands through [`ReadMatrix`] and
//! [`ReadVector`] and write through [`WriteMatrix`] and [`WriteVector`], so they accept the
//! crate's value types, nested arrays (interpreted as an array of rows) and storage-backed views
//! such as [`MatrixSlice`].
//!
//! Sums of products (matrix products, determinants, traces) are accumulated in [`f64`] and
//! rounded to the element type once, when they are written to the output.
//!
//! # Invertibility
//!
//! [`invert3`] and [`invert4`] treat a matrix as singular only if its determinant is *exactly*
//! zero. Nearly singular matrices are inverted and produce very large (or infinite) elements. A
//! singular matrix is reported by returning `false`, and leaves the output untouched:
//!
//! ```
//! # use ortho::*;
//! let mut out = Mat3d::IDENTITY * 7.0;
//! assert!(!matrices::invert3(&Mat3d::ZERO, &mut out));
//! assert_eq!(out, Mat3d::IDENTITY * 7.0);
//! ```
//!
//! [`vectors`]: crate::vectors
//! [`MatrixSlice`]: crate::buffer::MatrixSlice

use crate::{
    access::{ReadMatrix, ReadVector, WriteMatrix, WriteVector},
    approx::{ApproxContext, ApproxEq},
    context::MatrixContext,
    vectors, Error, Matrix, Real, Vector,
};

/// `out = a + b`.
pub fn add<T: Real, const N: usize>(
    a: &(impl ReadMatrix<T, N> + ?Sized),
    b: &(impl ReadMatrix<T, N> + ?Sized),
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, a.get(row, col) + b.get(row, col));
        }
    }
}

/// `a += b`.
pub fn add_in_place<'a, T: Real, M, const N: usize>(
    a: &'a mut M,
    b: &(impl ReadMatrix<T, N> + ?Sized),
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    for row in 0..N {
        for col in 0..N {
            let sum = a.get(row, col) + b.get(row, col);
            a.set(row, col, sum);
        }
    }
    a
}

/// `out = a - b`.
pub fn subtract<T: Real, const N: usize>(
    a: &(impl ReadMatrix<T, N> + ?Sized),
    b: &(impl ReadMatrix<T, N> + ?Sized),
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, a.get(row, col) - b.get(row, col));
        }
    }
}

/// `a -= b`.
pub fn subtract_in_place<'a, T: Real, M, const N: usize>(
    a: &'a mut M,
    b: &(impl ReadMatrix<T, N> + ?Sized),
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    for row in 0..N {
        for col in 0..N {
            let diff = a.get(row, col) - b.get(row, col);
            a.set(row, col, diff);
        }
    }
    a
}

/// `out = m * r`.
pub fn scale<T: Real, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    r: f64,
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, T::narrow(m.get(row, col).widen() * r));
        }
    }
}

/// `m *= r`.
pub fn scale_in_place<'a, T: Real, M, const N: usize>(m: &'a mut M, r: f64) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    for row in 0..N {
        for col in 0..N {
            let scaled = T::narrow(m.get(row, col).widen() * r);
            m.set(row, col, scaled);
        }
    }
    m
}

/// Computes the matrix product `out = a * b`.
pub fn multiply<T: Real, const N: usize>(
    a: &(impl ReadMatrix<T, N> + ?Sized),
    b: &(impl ReadMatrix<T, N> + ?Sized),
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    out.assign(product(a, b));
}

/// `a = a * b`.
pub fn multiply_in_place<'a, T: Real, M, const N: usize>(
    a: &'a mut M,
    b: &(impl ReadMatrix<T, N> + ?Sized),
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    let p = product(a, b);
    a.assign(p);
    a
}

fn product<T: Real, const N: usize>(
    a: &(impl ReadMatrix<T, N> + ?Sized),
    b: &(impl ReadMatrix<T, N> + ?Sized),
) -> Matrix<T, N> {
    Matrix::from_fn(|row, col| {
        let sum = (0..N).fold(0.0, |acc, k| {
            acc + a.get(row, k).widen() * b.get(k, col).widen()
        });
        T::narrow(sum)
    })
}

/// Multiplies `m` with the column vector `v`: `out = m * v`.
pub fn multiply_vector<T: Real, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    v: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    let result = Vector::<T, N>::from_fn(|row| {
        let sum = (0..N).fold(0.0, |acc, col| {
            acc + m.get(row, col).widen() * v.get(col).widen()
        });
        T::narrow(sum)
    });
    out.assign(result);
}

/// Writes the transpose of `m` into `out`.
pub fn transpose<T: Copy, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        for col in 0..N {
            out.set(col, row, m.get(row, col));
        }
    }
}

/// Transposes `m` in place.
pub fn transpose_in_place<'a, T: Copy, M, const N: usize>(m: &'a mut M) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    for row in 0..N {
        for col in row + 1..N {
            let upper = m.get(row, col);
            let lower = m.get(col, row);
            m.set(row, col, lower);
            m.set(col, row, upper);
        }
    }
    m
}

/// Overwrites `out` with the identity matrix.
pub fn set_identity<T: Real, const N: usize>(out: &mut (impl WriteMatrix<T, N> + ?Sized)) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, if row == col { T::ONE } else { T::ZERO });
        }
    }
}

/// Overwrites every element of `out` with zero.
pub fn set_zero<T: Real, const N: usize>(out: &mut (impl WriteMatrix<T, N> + ?Sized)) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, T::ZERO);
        }
    }
}

pub fn copy<T: Copy, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        for col in 0..N {
            out.set(row, col, m.get(row, col));
        }
    }
}

/// Copies row `row` of `m` into `out`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `row >= N`.
#[track_caller]
pub fn row<T: Copy, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    row: usize,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    check_row::<N>(row);
    out.assign(m.row(row));
}

/// Copies column `col` of `m` into `out`.
///
/// # Panics
///
/// Panics if `col >= N`.
#[track_caller]
pub fn column<T: Copy, const N: usize>(
    m: &(impl ReadMatrix<T, N> + ?Sized),
    col: usize,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    assert!(
        col < N,
        "column index {col} out of range for matrix with {N} columns"
    );
    out.assign(m.column(col));
}

/// Overwrites row `row` of `m` with `v`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `row >= N`.
#[track_caller]
pub fn set_row<T: Copy, const N: usize>(
    m: &mut (impl WriteMatrix<T, N> + ?Sized),
    row: usize,
    v: &(impl ReadVector<T, N> + ?Sized),
) {
    check_row::<N>(row);
    m.set_row(row, v.to_vector());
}

/// Returns the sum of the diagonal elements of `m`.
pub fn trace<T: Real, const N: usize>(m: &(impl ReadMatrix<T, N> + ?Sized)) -> f64 {
    (0..N).fold(0.0, |acc, i| acc + m.get(i, i).widen())
}

/// Computes the determinant of a 3x3 matrix.
pub fn determinant3<T: Real>(m: &(impl ReadMatrix<T, 3> + ?Sized)) -> f64 {
    let e = |row, col| m.get(row, col).widen();
    let [a, b, c] = [e(0, 0), e(0, 1), e(0, 2)];
    let [d, f, g] = [e(1, 0), e(1, 1), e(1, 2)];
    let [h, i, j] = [e(2, 0), e(2, 1), e(2, 2)];

    a * f * j + b * g * h + c * d * i - c * f * h - b * d * j - a * g * i
}

/// The permutations of `0..4` with their signs, for the Leibniz expansion of a 4x4 determinant.
#[rustfmt::skip]
const PERMUTATIONS4: [(f64, [usize; 4]); 24] = [
    ( 1.0, [0, 1, 2, 3]), (-1.0, [0, 1, 3, 2]), (-1.0, [0, 2, 1, 3]), ( 1.0, [0, 2, 3, 1]),
    ( 1.0, [0, 3, 1, 2]), (-1.0, [0, 3, 2, 1]), (-1.0, [1, 0, 2, 3]), ( 1.0, [1, 0, 3, 2]),
    ( 1.0, [1, 2, 0, 3]), (-1.0, [1, 2, 3, 0]), (-1.0, [1, 3, 0, 2]), ( 1.0, [1, 3, 2, 0]),
    ( 1.0, [2, 0, 1, 3]), (-1.0, [2, 0, 3, 1]), (-1.0, [2, 1, 0, 3]), ( 1.0, [2, 1, 3, 0]),
    ( 1.0, [2, 3, 0, 1]), (-1.0, [2, 3, 1, 0]), (-1.0, [3, 0, 1, 2]), ( 1.0, [3, 0, 2, 1]),
    ( 1.0, [3, 1, 0, 2]), (-1.0, [3, 1, 2, 0]), (-1.0, [3, 2, 0, 1]), ( 1.0, [3, 2, 1, 0]),
];

/// Computes the determinant of a 4x4 matrix.
///
/// This sums all 24 signed products of the Leibniz formula directly.
pub fn determinant4<T: Real>(m: &(impl ReadMatrix<T, 4> + ?Sized)) -> f64 {
    PERMUTATIONS4.iter().fold(0.0, |acc, (sign, perm)| {
        let term = (0..4).fold(*sign, |p, row| p * m.get(row, perm[row]).widen());
        acc + term
    })
}

/// Inverts the 3x3 matrix `m` into `out`.
///
/// Returns `false` and leaves `out` unmodified if the determinant of `m` is exactly zero.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// let m = Mat3d::from_rows([
///     [2.0, 0.0, 0.0],
///     [0.0, 4.0, 0.0],
///     [0.0, 0.0, 0.5],
/// ]);
/// let mut inv = Mat3d::ZERO;
/// assert!(matrices::invert3(&m, &mut inv));
/// assert_eq!(inv.diagonal(), [0.5, 0.25, 2.0]);
/// ```
pub fn invert3<T: Real>(
    m: &(impl ReadMatrix<T, 3> + ?Sized),
    out: &mut (impl WriteMatrix<T, 3> + ?Sized),
) -> bool {
    let det = determinant3(m);
    if det == 0.0 {
        log::trace!("determinant is zero, 3x3 matrix is not invertible");
        return false;
    }

    let e = |row, col| m.get(row, col).widen();
    let [a, b, c] = [e(0, 0), e(0, 1), e(0, 2)];
    let [d, f, g] = [e(1, 0), e(1, 1), e(1, 2)];
    let [h, i, j] = [e(2, 0), e(2, 1), e(2, 2)];

    // Adjugate, from the 2x2 minors.
    #[rustfmt::skip]
    let adjugate = [
        [f * j - g * i, c * i - b * j, b * g - c * f],
        [g * h - d * j, a * j - c * h, c * d - a * g],
        [d * i - f * h, b * h - a * i, a * f - b * d],
    ];

    let inv_det = 1.0 / det;
    for (row, elems) in adjugate.iter().enumerate() {
        for (col, elem) in elems.iter().enumerate() {
            out.set(row, col, T::narrow(elem * inv_det));
        }
    }
    true
}

/// Inverts the 3x3 matrix `m` in place.
///
/// Returns `false` and leaves `m` unmodified if its determinant is exactly zero.
pub fn invert3_in_place<T: Real, M>(m: &mut M) -> bool
where
    M: ReadMatrix<T, 3> + WriteMatrix<T, 3> + ?Sized,
{
    let mut inv = Matrix::<T, 3>::ZERO;
    if !invert3(m, &mut inv) {
        return false;
    }
    m.assign(inv);
    true
}

/// Inverts the 4x4 matrix `m` into `out`, using Laplace expansion.
///
/// Each cofactor is the determinant of a 3x3 minor that is assembled in `ctx`. The cofactors are
/// scaled by `1 / det` and written to `out` transposed, which turns the cofactor matrix into the
/// adjugate.
///
/// Returns `false` and leaves `out` unmodified if the determinant of `m` is exactly zero.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// let mut ctx = Context4d::new();
/// let mut inv = Mat4d::ZERO;
/// assert!(matrices::invert4(&mut ctx, &Mat4d::IDENTITY, &mut inv));
/// assert_eq!(inv, Mat4d::IDENTITY);
/// ```
pub fn invert4<T: Real>(
    ctx: &mut MatrixContext<T, 4>,
    m: &(impl ReadMatrix<T, 4> + ?Sized),
    out: &mut (impl WriteMatrix<T, 4> + ?Sized),
) -> bool {
    let det = determinant4(m);
    if det == 0.0 {
        log::trace!("determinant is zero, 4x4 matrix is not invertible");
        return false;
    }

    let inv_det = 1.0 / det;
    for row in 0..4 {
        for col in 0..4 {
            assemble_minor(m, row, col, &mut ctx.minor);
            let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
            ctx.cofactors[(row, col)] = sign * determinant3(&ctx.minor) * inv_det;
        }
    }

    for row in 0..4 {
        for col in 0..4 {
            out.set(col, row, T::narrow(ctx.cofactors[(row, col)]));
        }
    }
    true
}

/// Inverts the 4x4 matrix `m` in place.
///
/// Returns `false` and leaves `m` unmodified if its determinant is exactly zero.
pub fn invert4_in_place<T: Real, M>(ctx: &mut MatrixContext<T, 4>, m: &mut M) -> bool
where
    M: ReadMatrix<T, 4> + WriteMatrix<T, 4> + ?Sized,
{
    let mut inv = Matrix::<T, 4>::ZERO;
    if !invert4(ctx, m, &mut inv) {
        return false;
    }
    m.assign(inv);
    true
}

/// Writes `m` without row `skip_row` and column `skip_col` into `minor`.
fn assemble_minor<T: Real>(
    m: &(impl ReadMatrix<T, 4> + ?Sized),
    skip_row: usize,
    skip_col: usize,
    minor: &mut Matrix<f64, 3>,
) {
    let rows = (0..4).filter(|&r| r != skip_row);
    for (minor_row, row) in rows.enumerate() {
        let cols = (0..4).filter(|&c| c != skip_col);
        for (minor_col, col) in cols.enumerate() {
            minor[(minor_row, minor_col)] = m.get(row, col).widen();
        }
    }
}

#[track_caller]
fn check_row<const N: usize>(row: usize) {
    if row >= N {
        panic!("{}", Error::RowOutOfRange { row, rows: N });
    }
}

/// Writes the rows of `m` to `out`, replacing row `a` with `ctx.rows[0]` and row `b` with
/// `ctx.rows[1]` (when given).
fn write_rows<T: Copy, const N: usize>(
    ctx: &MatrixContext<T, N>,
    m: &(impl ReadMatrix<T, N> + ?Sized),
    a: usize,
    b: Option<usize>,
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    for row in 0..N {
        let v = if row == a {
            ctx.rows[0]
        } else if Some(row) == b {
            ctx.rows[1]
        } else {
            m.row(row)
        };
        out.set_row(row, v);
    }
}

/// Writes `m` to `out`, with row `row` multiplied by `r`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `row >= N`.
#[track_caller]
pub fn scale_row<T: Real, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &(impl ReadMatrix<T, N> + ?Sized),
    row: usize,
    r: f64,
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    check_row::<N>(row);
    ctx.rows[0] = m.row(row);
    vectors::scale_in_place(&mut ctx.rows[0], r);
    write_rows(ctx, m, row, None, out);
}

/// Multiplies row `row` of `m` by `r`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `row >= N`.
#[track_caller]
pub fn scale_row_in_place<'a, T: Real, M, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &'a mut M,
    row: usize,
    r: f64,
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    check_row::<N>(row);
    ctx.rows[0] = m.row(row);
    vectors::scale_in_place(&mut ctx.rows[0], r);
    m.set_row(row, ctx.rows[0]);
    m
}

/// Writes `m` to `out`, with rows `a` and `b` swapped.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `a >= N` or `b >= N`.
#[track_caller]
pub fn exchange_rows<T: Real, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &(impl ReadMatrix<T, N> + ?Sized),
    a: usize,
    b: usize,
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    check_row::<N>(a);
    check_row::<N>(b);
    ctx.rows[0] = m.row(b);
    ctx.rows[1] = m.row(a);
    write_rows(ctx, m, a, Some(b), out);
}

/// Swaps rows `a` and `b` of `m`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `a >= N` or `b >= N`.
#[track_caller]
pub fn exchange_rows_in_place<'a, T: Real, M, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &'a mut M,
    a: usize,
    b: usize,
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    check_row::<N>(a);
    check_row::<N>(b);
    ctx.rows[0] = m.row(a);
    ctx.rows[1] = m.row(b);
    m.set_row(a, ctx.rows[1]);
    m.set_row(b, ctx.rows[0]);
    m
}

/// Writes `m` to `out`, with row `from` multiplied by `r` added to row `to`.
///
/// This is the elementary row operation used to eliminate entries in Gaussian elimination.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `from >= N` or `to >= N`.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// let m = Mat3d::from_rows([
///     [2.0, 1.0, 1.0],
///     [4.0, 3.0, 3.0],
///     [8.0, 7.0, 9.0],
/// ]);
/// let mut ctx = Context3d::new();
/// let mut out = Mat3d::ZERO;
/// matrices::add_row_scaled(&mut ctx, &m, 0, 1, -2.0, &mut out);
/// assert_eq!(out.row(1), [0.0, 1.0, 1.0]);
/// assert_eq!(out.row(2), m.row(2));
/// ```
#[track_caller]
pub fn add_row_scaled<T: Real, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &(impl ReadMatrix<T, N> + ?Sized),
    from: usize,
    to: usize,
    r: f64,
    out: &mut (impl WriteMatrix<T, N> + ?Sized),
) {
    check_row::<N>(from);
    check_row::<N>(to);
    ctx.rows[0] = m.row(to);
    ctx.rows[1] = m.row(from);
    let [dst, src] = &mut ctx.rows;
    vectors::add_scaled_in_place(dst, &*src, r);
    write_rows(ctx, m, to, None, out);
}

/// Adds row `from` of `m`, multiplied by `r`, to row `to`.
///
/// # Panics
///
/// Panics with [`Error::RowOutOfRange`] if `from >= N` or `to >= N`.
#[track_caller]
pub fn add_row_scaled_in_place<'a, T: Real, M, const N: usize>(
    ctx: &mut MatrixContext<T, N>,
    m: &'a mut M,
    from: usize,
    to: usize,
    r: f64,
) -> &'a mut M
where
    M: ReadMatrix<T, N> + WriteMatrix<T, N> + ?Sized,
{
    check_row::<N>(from);
    check_row::<N>(to);
    ctx.rows[0] = m.row(to);
    ctx.rows[1] = m.row(from);
    let [dst, src] = &mut ctx.rows;
    vectors::add_scaled_in_place(dst, &*src, r);
    m.set_row(to, ctx.rows[0]);
    m
}

/// Computes the rotation and translation of a camera at `origin` looking at `target`.
///
/// The rotation's rows are the camera's side, up and backward axes, so that it maps world
/// directions into camera space with the camera looking down its negative Z axis. The
/// translation is `-origin`. A world-space point `p` ends up at `rotation * (p + translation)`.
///
/// `up` only has to point roughly upwards. If it is parallel to the viewing direction, the side
/// axis cannot be determined and the rotation will contain zeroes or `NaN`s; no error is
/// reported.
pub fn look_at3<T: Real>(
    origin: &(impl ReadVector<T, 3> + ?Sized),
    target: &(impl ReadVector<T, 3> + ?Sized),
    up: &(impl ReadVector<T, 3> + ?Sized),
    rotation: &mut (impl WriteMatrix<T, 3> + ?Sized),
    translation: &mut (impl WriteVector<T, 3> + ?Sized),
) {
    let mut forward = Vector::<T, 3>::ZERO;
    vectors::subtract(target, origin, &mut forward);
    vectors::normalize_in_place(&mut forward);

    let mut side = Vector::<T, 3>::ZERO;
    vectors::cross(&forward, up, &mut side);
    vectors::normalize_in_place(&mut side);

    let mut new_up = Vector::<T, 3>::ZERO;
    vectors::cross(&side, &forward, &mut new_up);

    rotation.set_row(0, side);
    rotation.set_row(1, new_up);
    rotation.set_row(2, -forward);

    vectors::negate(origin, translation);
}

/// Computes the view matrix of a camera at `origin` looking at `target`.
///
/// This is the rotation computed by [`look_at3`] multiplied with a translation by `-origin`.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// let mut ctx = Context4d::new();
/// let mut view = Mat4d::ZERO;
/// let eye = vec3(0.0, 0.0, 5.0);
/// matrices::look_at4(&mut ctx, &eye, &Vec3d::ZERO, &Vec3d::Y, &mut view);
///
/// // The target ends up in front of the camera, on its negative Z axis.
/// assert_eq!(view * vec4(0.0, 0.0, 0.0, 1.0), vec4(0.0, 0.0, -5.0, 1.0));
/// ```
pub fn look_at4<T: Real>(
    ctx: &mut MatrixContext<T, 4>,
    origin: &(impl ReadVector<T, 3> + ?Sized),
    target: &(impl ReadVector<T, 3> + ?Sized),
    up: &(impl ReadVector<T, 3> + ?Sized),
    out: &mut (impl WriteMatrix<T, 4> + ?Sized),
) {
    let mut rotation = Matrix::<T, 3>::ZERO;
    let mut translation = Vector::<T, 3>::ZERO;
    look_at3(origin, target, up, &mut rotation, &mut translation);

    embed3(&rotation, &mut ctx.rotation);
    make_translation4(&translation, &mut ctx.translation);
    multiply(&ctx.rotation, &ctx.translation, out);
}

/// Writes a 4x4 matrix with `m` in its upper left corner and the identity elsewhere.
fn embed3<T: Real>(m: &Matrix<T, 3>, out: &mut Matrix<T, 4>) {
    *out = Matrix::<T, 4>::IDENTITY;
    for row in 0..3 {
        for col in 0..3 {
            out[(row, col)] = m[(row, col)];
        }
    }
}

/// Computes the 3x3 rotation matrix for a rotation by `angle` radians around `axis`, using
/// [Rodrigues' rotation formula].
///
/// The rotation is counterclockwise when looking against the direction of `axis` (right-hand
/// rule). `axis` must have unit length; it is not normalized here.
///
/// [Rodrigues' rotation formula]: https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// use std::f64::consts::FRAC_PI_2;
///
/// let mut rot = Mat3d::ZERO;
/// matrices::make_rotation3(&Vec3d::Z, FRAC_PI_2, &mut rot);
/// assert_approx_eq!(rot * Vec3d::X, Vec3d::Y);
/// ```
pub fn make_rotation3<T: Real>(
    axis: &(impl ReadVector<T, 3> + ?Sized),
    angle: f64,
    out: &mut (impl WriteMatrix<T, 3> + ?Sized),
) {
    let [x, y, z] = axis.to_vector().map(T::widen).into_array();
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    #[rustfmt::skip]
    let rows = [
        [t * x * x + c,     t * x * y - s * z, t * x * z + s * y],
        [t * x * y + s * z, t * y * y + c,     t * y * z - s * x],
        [t * x * z - s * y, t * y * z + s * x, t * z * z + c    ],
    ];
    for (row, elems) in rows.iter().enumerate() {
        for (col, elem) in elems.iter().enumerate() {
            out.set(row, col, T::narrow(*elem));
        }
    }
}

/// Computes the 4x4 matrix for a rotation by `angle` radians around `axis`.
///
/// See [`make_rotation3`].
pub fn make_rotation4<T: Real>(
    axis: &(impl ReadVector<T, 3> + ?Sized),
    angle: f64,
    out: &mut (impl WriteMatrix<T, 4> + ?Sized),
) {
    let mut rotation = Matrix::<T, 3>::ZERO;
    make_rotation3(axis, angle, &mut rotation);
    let mut m = Matrix::<T, 4>::ZERO;
    embed3(&rotation, &mut m);
    out.assign(m);
}

/// Computes the 4x4 matrix for a translation by `t`.
pub fn make_translation4<T: Real>(
    t: &(impl ReadVector<T, 3> + ?Sized),
    out: &mut (impl WriteMatrix<T, 4> + ?Sized),
) {
    set_identity(out);
    for row in 0..3 {
        out.set(row, 3, t.get(row));
    }
}

/// Compares `a` and `b` element-wise using the tolerances in `context`.
pub fn almost_equal<T, const N: usize>(
    context: &ApproxContext<T::Tolerance>,
    a: &(impl ReadMatrix<T, N> + ?Sized),
    b: &(impl ReadMatrix<T, N> + ?Sized),
) -> bool
where
    T: ApproxEq,
{
    (0..N).all(|row| (0..N).all(|col| context.almost_equal(&a.get(row, col), &b.get(row, col))))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::{
        assert_approx_eq, vec3, Context3d, Context3f, Context4d, Context4f, Mat3d, Mat3f, Mat4d,
        Mat4f, Vec3d, Vec3f,
    };

    use super::*;

    #[rustfmt::skip]
    fn sample4() -> Mat4d {
        Mat4d::from_rows([
            [ 4.0, 7.0, 2.0, 3.0],
            [ 0.0, 5.0, 0.0, 1.0],
            [ 1.0, 0.0, 6.0, 2.0],
            [ 2.0, 1.0, 0.0, 8.0],
        ])
    }

    #[test]
    fn identity_and_zero() {
        let mut m = Mat4f::ZERO;
        set_identity(&mut m);
        assert_eq!(m, Mat4f::IDENTITY);
        set_zero(&mut m);
        assert_eq!(m, Mat4f::ZERO);

        let mut rows = [[5.0; 3]; 3];
        set_identity(&mut rows);
        assert_eq!(rows, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn arithmetic() {
        let a = sample4();
        let mut out = Mat4d::ZERO;
        add(&a, &Mat4d::IDENTITY, &mut out);
        assert_eq!(out[(0, 0)], 5.0);
        assert_eq!(out[(0, 1)], 7.0);

        subtract_in_place(&mut out, &a);
        assert_eq!(out, Mat4d::IDENTITY);

        scale(&a, 0.5, &mut out);
        assert_eq!(out[(3, 3)], 4.0);
        scale_in_place(&mut out, 2.0);
        assert_eq!(out, a);

        add_in_place(&mut out, &a);
        assert_eq!(out, a * 2.0);
    }

    #[test]
    fn multiply_() {
        let a = sample4();
        let mut out = Mat4d::ZERO;
        multiply(&a, &Mat4d::IDENTITY, &mut out);
        assert_eq!(out, a);

        let mut m = Mat4d::IDENTITY;
        multiply_in_place(&mut m, &a);
        assert_eq!(m, a);

        let mut v = Vec3d::ZERO;
        let rot = Mat3d::from_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        multiply_vector(&rot, &Vec3d::X, &mut v);
        assert_eq!(v, Vec3d::Y);
    }

    #[test]
    fn transpose_() {
        let a = sample4();
        let mut t = Mat4d::ZERO;
        transpose(&a, &mut t);
        assert_eq!(t, a.transpose());
        transpose_in_place(&mut t);
        assert_eq!(t, a);
    }

    #[test]
    fn trace_() {
        assert_eq!(trace(&sample4()), 23.0);
        assert_eq!(trace(&Mat3f::IDENTITY), 3.0);
    }

    #[test]
    fn determinants() {
        assert_eq!(determinant4(&Mat4d::IDENTITY), 1.0);
        assert_eq!(determinant4(&Mat4f::ZERO), 0.0);
        assert_eq!(determinant3(&Mat3d::IDENTITY), 1.0);

        // Laplace expansion along the second row, which only has two non-zero entries.
        let a = sample4();
        let expected = 5.0
            * determinant3(&Mat3d::from_rows([
                [4.0, 2.0, 3.0],
                [1.0, 6.0, 2.0],
                [2.0, 0.0, 8.0],
            ]))
            + 1.0
                * determinant3(&Mat3d::from_rows([
                    [4.0, 7.0, 2.0],
                    [1.0, 0.0, 6.0],
                    [2.0, 1.0, 0.0],
                ]));
        assert_eq!(determinant4(&a), expected);
        assert_eq!(determinant4(&a.transpose()), expected);
    }

    #[test]
    fn invert3_() {
        #[rustfmt::skip]
        let m = Mat3d::from_rows([
            [-2.0, -1.0,  2.0],
            [ 2.0,  1.0,  4.0],
            [-3.0,  3.0, -1.0],
        ]);
        let mut inv = Mat3d::ZERO;
        assert!(invert3(&m, &mut inv));
        assert_approx_eq!(m * inv, Mat3d::IDENTITY).abs(1e-15);
        assert_approx_eq!(inv * m, Mat3d::IDENTITY).abs(1e-15);

        let mut m2 = m;
        assert!(invert3_in_place(&mut m2));
        assert_eq!(m2, inv);
    }

    #[test]
    fn invert3_singular() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut out = Mat3f::IDENTITY;
        assert!(!invert3(&Mat3f::ZERO, &mut out));
        assert_eq!(out, Mat3f::IDENTITY);

        // Rank 2.
        let mut m = Mat3d::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert!(!invert3_in_place(&mut m));
        assert_eq!(m.row(1), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn invert4_() {
        let mut ctx = Context4d::new();
        let a = sample4();
        let mut inv = Mat4d::ZERO;
        assert!(invert4(&mut ctx, &a, &mut inv));
        assert_approx_eq!(a * inv, Mat4d::IDENTITY).abs(1e-14);

        let mut inv_inv = Mat4d::ZERO;
        assert!(invert4(&mut ctx, &inv, &mut inv_inv));
        assert_approx_eq!(inv_inv, a).abs(1e-13);

        let mut b = a;
        assert!(invert4_in_place(&mut ctx, &mut b));
        assert_eq!(b, inv);
    }

    #[test]
    fn invert4_identity_and_singular() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut ctx = Context4f::new();
        let mut out = Mat4f::ZERO;
        assert!(invert4(&mut ctx, &Mat4f::IDENTITY, &mut out));
        assert_eq!(out, Mat4f::IDENTITY);

        let mut out = Mat4f::IDENTITY * 3.0;
        assert!(!invert4(&mut ctx, &Mat4f::ZERO, &mut out));
        assert_eq!(out, Mat4f::IDENTITY * 3.0);
    }

    #[test]
    fn row_access() {
        let a = sample4();
        let mut v = Vector::<f64, 4>::ZERO;
        row(&a, 2, &mut v);
        assert_eq!(v, [1.0, 0.0, 6.0, 2.0]);
        column(&a, 1, &mut v);
        assert_eq!(v, [7.0, 5.0, 0.0, 1.0]);

        let mut m = a;
        set_row(&mut m, 0, &[9.0; 4]);
        assert_eq!(m.row(0), [9.0; 4]);
        assert_eq!(m.row(1), a.row(1));
    }

    #[test]
    #[should_panic(expected = "row index 3 out of range for matrix with 3 rows")]
    fn row_out_of_range() {
        let mut v = Vec3d::ZERO;
        row(&Mat3d::IDENTITY, 3, &mut v);
    }

    #[test]
    fn row_operations() {
        let mut ctx = Context3d::new();
        let m = Mat3d::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let mut out = Mat3d::ZERO;

        scale_row(&mut ctx, &m, 1, 2.0, &mut out);
        assert_eq!(out, Mat3d::from_rows([[1.0, 2.0, 3.0], [8.0, 10.0, 12.0], [7.0, 8.0, 9.0]]));

        exchange_rows(&mut ctx, &m, 0, 2, &mut out);
        assert_eq!(out, Mat3d::from_rows([[7.0, 8.0, 9.0], [4.0, 5.0, 6.0], [1.0, 2.0, 3.0]]));

        exchange_rows(&mut ctx, &m, 1, 1, &mut out);
        assert_eq!(out, m);

        add_row_scaled(&mut ctx, &m, 0, 2, -7.0, &mut out);
        assert_eq!(out.row(2), [0.0, -6.0, -12.0]);
        assert_eq!(out.row(0), m.row(0));
    }

    #[test]
    fn row_operations_in_place() {
        let mut ctx = Context3f::new();
        let mut m = Mat3f::from_rows([[2.0, 1.0, 1.0], [4.0, 3.0, 3.0], [8.0, 7.0, 9.0]]);

        // Forward elimination.
        add_row_scaled_in_place(&mut ctx, &mut m, 0, 1, -2.0);
        add_row_scaled_in_place(&mut ctx, &mut m, 0, 2, -4.0);
        add_row_scaled_in_place(&mut ctx, &mut m, 1, 2, -3.0);
        assert_eq!(m, Mat3f::from_rows([[2.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 2.0]]));

        scale_row_in_place(&mut ctx, &mut m, 2, 0.5);
        exchange_rows_in_place(&mut ctx, &mut m, 0, 2);
        assert_eq!(m, Mat3f::from_rows([[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [2.0, 1.0, 1.0]]));
    }

    #[test]
    #[should_panic(expected = "row index 4 out of range for matrix with 4 rows")]
    fn exchange_rows_out_of_range() {
        let mut ctx = Context4d::new();
        let mut m = Mat4d::IDENTITY;
        exchange_rows_in_place(&mut ctx, &mut m, 0, 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn add_row_scaled_out_of_range() {
        let mut ctx = Context3d::new();
        let mut out = Mat3d::ZERO;
        add_row_scaled(&mut ctx, &Mat3d::IDENTITY, 7, 0, 1.0, &mut out);
    }

    #[test]
    fn rotation() {
        let mut rot = Mat3d::ZERO;
        make_rotation3(&Vec3d::Z, FRAC_PI_2, &mut rot);
        assert_approx_eq!(rot * Vec3d::X, Vec3d::Y);
        assert_approx_eq!(rot * Vec3d::Y, -Vec3d::X);
        assert_approx_eq!(rot * Vec3d::Z, Vec3d::Z);
        assert_approx_eq!(determinant3(&rot), 1.0);

        make_rotation3(&Vec3d::X, PI, &mut rot);
        assert_approx_eq!(rot * Vec3d::Y, -Vec3d::Y).abs(1e-15);

        let mut rot4 = Mat4f::ZERO;
        make_rotation4(&Vec3f::Y, 0.0, &mut rot4);
        assert_eq!(rot4, Mat4f::IDENTITY);
    }

    #[test]
    fn translation() {
        let mut m = Mat4d::ZERO;
        make_translation4(&vec3(1.0, 2.0, 3.0), &mut m);
        assert_eq!(m.column(3), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m * crate::vec4(1.0, 1.0, 1.0, 1.0), [2.0, 3.0, 4.0, 1.0]);
        // Directions (w = 0) are not translated.
        assert_eq!(m * crate::vec4(1.0, 1.0, 1.0, 0.0), [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn look_at() {
        let mut rotation = Mat3d::ZERO;
        let mut translation = Vec3d::ZERO;
        let eye = vec3(1.0, 2.0, 3.0);
        look_at3(&eye, &vec3(1.0, 2.0, -10.0), &Vec3d::Y, &mut rotation, &mut translation);
        // Looking down -Z with Y up is the identity rotation.
        assert_eq!(rotation, Mat3d::IDENTITY);
        assert_eq!(translation, -eye);

        look_at3(&Vec3d::ZERO, &Vec3d::X, &Vec3d::Y, &mut rotation, &mut translation);
        assert_eq!(rotation.row(0), [0.0, 0.0, 1.0]);
        assert_eq!(rotation.row(1), [0.0, 1.0, 0.0]);
        assert_eq!(rotation.row(2), [-1.0, -0.0, -0.0]);

        let mut ctx = Context4d::new();
        let mut view = Mat4d::ZERO;
        look_at4(&mut ctx, &eye, &Vec3d::ZERO, &Vec3d::Y, &mut view);
        let eye_in_view = view * eye.extend(1.0);
        assert_approx_eq!(eye_in_view, crate::vec4(0.0, 0.0, 0.0, 1.0)).abs(1e-15);
    }

    #[test]
    fn look_at_parallel_up_does_not_panic() {
        let mut rotation = Mat3f::ZERO;
        let mut translation = Vec3f::ZERO;
        look_at3(&Vec3f::ZERO, &Vec3f::Y, &Vec3f::Y, &mut rotation, &mut translation);
        assert_eq!(rotation.row(0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn almost_equal_() {
        let ctx = ApproxContext::new(1e-9, 0.0);
        let mut m = Mat3d::IDENTITY;
        m[(1, 2)] = 1e-12;
        assert!(almost_equal(&ctx, &m, &Mat3d::IDENTITY));
        assert_ne!(m, Mat3d::IDENTITY);
        m[(1, 2)] = 1e-6;
        assert!(!almost_equal(&ctx, &m, &Mat3d::IDENTITY));
    }
}
