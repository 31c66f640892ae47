//! Vector operations with explicit outputs.
//!
//! Every function in this module reads its operands through [`ReadVector`] and writes its result
//! through [`WriteVector`], so it works with the crate's [`Vector`] type, plain arrays, and any
//! other storage implementing those traits. None of them allocate.
//!
//! Functions ending in `_in_place` use their first operand as the output and return it.
//!
//! # Precision
//!
//! Dot products and scale factors use the element type's [accumulator][Scalar::Accum]: [`f32`]
//! vectors compute dot products, magnitudes and scaled values in [`f64`] and round once when the
//! result is written back.
//!
//! # Integer overflow
//!
//! Integer vectors never wrap. The regular operations panic on overflow; the `checked_*` functions
//! return [`Error::Overflow`] and leave their output untouched instead.
//!
//! ```
//! # use ortho::*;
//! let mut out = Vec3l::ZERO;
//! let res = vectors::checked_add(&vec3(i64::MAX, 0, 0), &vec3(1, 0, 0), &mut out);
//! assert_eq!(res, Err(Error::Overflow { op: "add" }));
//! assert_eq!(out, Vec3l::ZERO);
//! ```

use crate::{
    access::{ReadVector, WriteVector},
    approx::{ApproxContext, ApproxEq},
    Error, Real, Scalar, Vector, Zero,
};

/// `out = a + b`.
pub fn add<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, a.get(i).add_exact(b.get(i)));
    }
}

/// `a += b`.
pub fn add_in_place<'a, T: Scalar, V, const N: usize>(
    a: &'a mut V,
    b: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let sum = a.get(i).add_exact(b.get(i));
        a.set(i, sum);
    }
    a
}

/// `out = a - b`.
pub fn subtract<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, a.get(i).sub_exact(b.get(i)));
    }
}

/// `a -= b`.
pub fn subtract_in_place<'a, T: Scalar, V, const N: usize>(
    a: &'a mut V,
    b: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let diff = a.get(i).sub_exact(b.get(i));
        a.set(i, diff);
    }
    a
}

/// `out = a * b`, element-wise.
pub fn multiply_elementwise<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, a.get(i).mul_exact(b.get(i)));
    }
}

/// `a *= b`, element by element.
pub fn multiply_elementwise_in_place<'a, T: Scalar, V, const N: usize>(
    a: &'a mut V,
    b: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = a.get(i).mul_exact(b.get(i));
        a.set(i, elem);
    }
    a
}

/// `out = -v`.
pub fn negate<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, T::ZERO.sub_exact(v.get(i)));
    }
}

/// `v = -v`.
pub fn negate_in_place<'a, T: Scalar, V, const N: usize>(v: &'a mut V) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let neg = T::ZERO.sub_exact(v.get(i));
        v.set(i, neg);
    }
    v
}

/// `out = v * r`.
///
/// The product is computed in the accumulator type and then narrowed, so `f32` vectors can be
/// scaled by an `f64` factor without losing precision in the factor.
pub fn scale<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    r: T::Accum,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, T::narrow(v.get(i).widen().mul_exact(r)));
    }
}

/// `v *= r`.
pub fn scale_in_place<'a, T: Scalar, V, const N: usize>(v: &'a mut V, r: T::Accum) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let scaled = T::narrow(v.get(i).widen().mul_exact(r));
        v.set(i, scaled);
    }
    v
}

/// `out = a + b * r`.
pub fn add_scaled<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    r: T::Accum,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        let elem = a.get(i).widen().add_exact(b.get(i).widen().mul_exact(r));
        out.set(i, T::narrow(elem));
    }
}

/// `a += b * r`.
pub fn add_scaled_in_place<'a, T: Scalar, V, const N: usize>(
    a: &'a mut V,
    b: &(impl ReadVector<T, N> + ?Sized),
    r: T::Accum,
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = a.get(i).widen().add_exact(b.get(i).widen().mul_exact(r));
        a.set(i, T::narrow(elem));
    }
    a
}

/// Clamps each element of `v` to the inclusive range `[min, max]`.
pub fn clamp<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    min: T,
    max: T,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).clamp(min, max));
    }
}

/// Clamps each element of `v` to `min..=max`, in place.
pub fn clamp_in_place<'a, T: Scalar, V, const N: usize>(v: &'a mut V, min: T, max: T) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).clamp(min, max);
        v.set(i, elem);
    }
    v
}

/// Clamps each element of `v` to the range given by the corresponding elements of `min` and
/// `max`.
pub fn clamp_by_vector<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    min: &(impl ReadVector<T, N> + ?Sized),
    max: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).clamp(min.get(i), max.get(i)));
    }
}

/// Clamps each element of `v` between the corresponding elements of `min` and `max`, in place.
pub fn clamp_by_vector_in_place<'a, T: Scalar, V, const N: usize>(
    v: &'a mut V,
    min: &(impl ReadVector<T, N> + ?Sized),
    max: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).clamp(min.get(i), max.get(i));
        v.set(i, elem);
    }
    v
}

/// Raises each element of `v` to at least `min`.
pub fn clamp_minimum<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    min: T,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).max(min));
    }
}

/// Raises each element of `v` to at least `min`, in place.
pub fn clamp_minimum_in_place<'a, T: Scalar, V, const N: usize>(v: &'a mut V, min: T) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).max(min);
        v.set(i, elem);
    }
    v
}

/// Lowers each element of `v` to at most `max`.
pub fn clamp_maximum<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    max: T,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).min(max));
    }
}

/// Lowers each element of `v` to at most `max`, in place.
pub fn clamp_maximum_in_place<'a, T: Scalar, V, const N: usize>(v: &'a mut V, max: T) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).min(max);
        v.set(i, elem);
    }
    v
}

/// Raises each element of `v` to at least the corresponding element of `min`.
pub fn clamp_minimum_by_vector<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    min: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).max(min.get(i)));
    }
}

/// `v = max(v, min)`, element by element.
pub fn clamp_minimum_by_vector_in_place<'a, T: Scalar, V, const N: usize>(
    v: &'a mut V,
    min: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).max(min.get(i));
        v.set(i, elem);
    }
    v
}

/// Lowers each element of `v` to at most the corresponding element of `max`.
pub fn clamp_maximum_by_vector<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    max: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i).min(max.get(i)));
    }
}

/// `v = min(v, max)`, element by element.
pub fn clamp_maximum_by_vector_in_place<'a, T: Scalar, V, const N: usize>(
    v: &'a mut V,
    max: &(impl ReadVector<T, N> + ?Sized),
) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    for i in 0..N {
        let elem = v.get(i).min(max.get(i));
        v.set(i, elem);
    }
    v
}

/// Copies the elements of `v` into `out`.
pub fn copy<T, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        out.set(i, v.get(i));
    }
}

/// Computes the dot product of `a` and `b` in the accumulator type.
///
/// ```
/// # use ortho::*;
/// // `f32` inputs, `f64` result.
/// let d: f64 = vectors::dot(&vec3(0.1f32, 0.2, 0.3), &vec3(1.0f32, 1.0, 1.0));
/// assert_eq!(d, 0.1f32 as f64 + 0.2f32 as f64 + 0.3f32 as f64);
/// ```
pub fn dot<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
) -> T::Accum {
    (0..N).fold(<T::Accum as Zero>::ZERO, |acc, i| {
        acc.add_exact(a.get(i).widen().mul_exact(b.get(i).widen()))
    })
}

/// Returns `dot(v, v)`.
pub fn magnitude_squared<T: Scalar, const N: usize>(v: &(impl ReadVector<T, N> + ?Sized)) -> T::Accum {
    dot(v, v)
}

/// Returns the Euclidean length of `v`.
pub fn magnitude<T: Real, const N: usize>(v: &(impl ReadVector<T, N> + ?Sized)) -> f64 {
    magnitude_squared(v).sqrt()
}

/// Returns the Euclidean distance between `a` and `b`.
pub fn distance<T: Real, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
) -> f64 {
    (0..N)
        .map(|i| a.get(i).widen() - b.get(i).widen())
        .fold(0.0, |acc, d| acc + d * d)
        .sqrt()
}

/// Returns the angle between `a` and `b`, in radians.
///
/// The cosine is clamped to `[-1, 1]` before taking the arc cosine, so rounding errors in nearly
/// parallel vectors do not produce `NaN`. If either vector has zero length, the result is `NaN`.
pub fn angle<T: Real, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
) -> f64 {
    let m = magnitude(a) * magnitude(b);
    (dot(a, b) / m).clamp(-1.0, 1.0).acos()
}

/// Writes `v` scaled to unit length into `out`.
///
/// A zero vector has no direction; it is copied to `out` unchanged instead of producing `NaN`s.
pub fn normalize<T: Real, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    let m = magnitude_squared(v);
    if m > 0.0 {
        scale(v, 1.0 / m.sqrt(), out);
    } else {
        copy(v, out);
    }
}

/// Scales `v` to unit length. Zero vectors are left unchanged.
pub fn normalize_in_place<'a, T: Real, V, const N: usize>(v: &'a mut V) -> &'a mut V
where
    V: ReadVector<T, N> + WriteVector<T, N> + ?Sized,
{
    let m = magnitude_squared(v);
    if m > 0.0 {
        scale_in_place(v, 1.0 / m.sqrt());
    }
    v
}

/// Computes the cross product `a × b`.
///
/// The result is perpendicular to both inputs and follows the right-hand rule.
pub fn cross<T: Scalar>(
    a: &(impl ReadVector<T, 3> + ?Sized),
    b: &(impl ReadVector<T, 3> + ?Sized),
    out: &mut (impl WriteVector<T, 3> + ?Sized),
) {
    out.assign(cross_product(a, b));
}

/// `a = a × b`.
pub fn cross_in_place<'a, T: Scalar, V>(a: &'a mut V, b: &(impl ReadVector<T, 3> + ?Sized)) -> &'a mut V
where
    V: ReadVector<T, 3> + WriteVector<T, 3> + ?Sized,
{
    let c = cross_product(a, b);
    a.assign(c);
    a
}

fn cross_product<T: Scalar>(
    a: &(impl ReadVector<T, 3> + ?Sized),
    b: &(impl ReadVector<T, 3> + ?Sized),
) -> Vector<T, 3> {
    let [a1, a2, a3] = a.to_vector().into_array();
    let [b1, b2, b3] = b.to_vector().into_array();

    #[rustfmt::skip]
    let cross = [
        a2.mul_exact(b3).sub_exact(a3.mul_exact(b2)),
        a3.mul_exact(b1).sub_exact(a1.mul_exact(b3)),
        a1.mul_exact(b2).sub_exact(a2.mul_exact(b1)),
    ];
    cross.into()
}

/// Linearly interpolates between `a` and `b`: `out = a * (1 - alpha) + b * alpha`.
///
/// `alpha` is not clamped, so values outside `[0, 1]` extrapolate.
pub fn interpolate_linear<T: Real, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    alpha: f64,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    for i in 0..N {
        let elem = a.get(i).widen() * (1.0 - alpha) + b.get(i).widen() * alpha;
        out.set(i, T::narrow(elem));
    }
}

/// Projects `p` onto `q`: `out = q * (dot(p, q) / dot(q, q))`.
///
/// If `q` has zero length, the result is `NaN`.
pub fn project<T: Real, const N: usize>(
    p: &(impl ReadVector<T, N> + ?Sized),
    q: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) {
    scale(q, dot(p, q) / magnitude_squared(q), out);
}

/// Gram-Schmidt orthonormalization of two vectors.
///
/// `out0` receives `v0` normalized. `out1` receives `v1` with its component along `v0` removed,
/// normalized. If `v1` is parallel to `v0`, the remainder is (close to) zero and its direction is
/// meaningless; no error is reported.
pub fn orthonormalize<T: Real, const N: usize>(
    v0: &(impl ReadVector<T, N> + ?Sized),
    v1: &(impl ReadVector<T, N> + ?Sized),
    out0: &mut (impl WriteVector<T, N> + ?Sized),
    out1: &mut (impl WriteVector<T, N> + ?Sized),
) {
    let mut u0 = v0.to_vector();
    normalize_in_place(&mut u0);

    let d = dot(v1, &u0);
    let mut u1 = v1.to_vector();
    add_scaled_in_place(&mut u1, &u0, -d);
    normalize_in_place(&mut u1);

    out0.assign(u0);
    out1.assign(u1);
}

/// Compares `a` and `b` element-wise using the tolerances in `context`.
///
/// This is separate from `==`, which always compares exactly.
pub fn almost_equal<T, const N: usize>(
    context: &ApproxContext<T::Tolerance>,
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
) -> bool
where
    T: ApproxEq,
{
    (0..N).all(|i| context.almost_equal(&a.get(i), &b.get(i)))
}

/// `out = a + b`, failing instead of panicking on overflow.
///
/// `out` is only written to if the whole operation succeeds.
pub fn checked_add<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) -> Result<(), Error> {
    let sum = try_from_fn(|i| a.get(i).checked_add(b.get(i)), "add")?;
    out.assign(sum);
    Ok(())
}

/// `out = a - b`, failing instead of panicking on overflow.
///
/// `out` is only written to if the whole operation succeeds.
pub fn checked_subtract<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    out: &mut (impl WriteVector<T, N> + ?Sized),
) -> Result<(), Error> {
    let diff = try_from_fn(|i| a.get(i).checked_sub(b.get(i)), "subtract")?;
    out.assign(diff);
    Ok(())
}

/// `out = v * r`, failing instead of panicking on overflow.
///
/// `out` is only written to if the whole operation succeeds.
pub fn checked_scale<T: Scalar, const N: usize>(
    v: &(impl ReadVector<T, N> + ?Sized),
    r: T::Accum,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) -> Result<(), Error> {
    let scaled = try_from_fn(|i| v.get(i).widen().checked_mul(r).map(T::narrow), "multiply")?;
    out.assign(scaled);
    Ok(())
}

/// `out = a + b * r`, failing instead of panicking on overflow.
///
/// `out` is only written to if the whole operation succeeds.
pub fn checked_add_scaled<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
    r: T::Accum,
    out: &mut (impl WriteVector<T, N> + ?Sized),
) -> Result<(), Error> {
    let product: Vector<T::Accum, N> =
        try_from_fn(|i| b.get(i).widen().checked_mul(r), "multiply")?;
    let sum = try_from_fn(
        |i| a.get(i).widen().checked_add(product[i]).map(T::narrow),
        "add",
    )?;
    out.assign(sum);
    Ok(())
}

/// Dot product, failing instead of panicking on overflow.
pub fn checked_dot<T: Scalar, const N: usize>(
    a: &(impl ReadVector<T, N> + ?Sized),
    b: &(impl ReadVector<T, N> + ?Sized),
) -> Result<T::Accum, Error> {
    let mut acc = <T::Accum as Zero>::ZERO;
    for i in 0..N {
        let product = a
            .get(i)
            .widen()
            .checked_mul(b.get(i).widen())
            .ok_or(Error::Overflow { op: "multiply" })?;
        acc = acc
            .checked_add(product)
            .ok_or(Error::Overflow { op: "add" })?;
    }
    Ok(acc)
}

fn try_from_fn<U: Copy + Zero, const N: usize>(
    mut f: impl FnMut(usize) -> Option<U>,
    op: &'static str,
) -> Result<Vector<U, N>, Error> {
    let mut out = [U::ZERO; N];
    for (i, elem) in out.iter_mut().enumerate() {
        *elem = f(i).ok_or(Error::Overflow { op })?;
    }
    Ok(out.into())
}
