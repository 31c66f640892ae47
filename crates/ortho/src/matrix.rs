use std::{array, fmt, slice};

use crate::{
    context::MatrixContext, matrices, vector::fmt_fixed, One, Real, Scalar, Vector, Zero,
};

mod ops;

/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4>;

/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 3x3 matrix with [`f64`] elements.
pub type Mat3d = Mat3<f64>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;
/// A 4x4 matrix with [`f64`] elements.
pub type Mat4d = Mat4<f64>;

/// A square `N`x`N` matrix with element type `T`.
///
/// # Layout
///
/// Elements are stored column by column, which is the layout graphics APIs expect for uniform
/// data. [`Matrix::as_column_major`] exposes that storage as a flat slice. The storage order never
/// shows up in the rest of the API: elements are always addressed as `(row, column)`.
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] take an array of rows or columns (arrays
///   or [`Vector`]s).
/// - [`Matrix::from_fn`] invokes a closure with the row and column of each element.
/// - [`Matrix::ZERO`] and `Matrix::IDENTITY` are the zero and identity matrix. The [`Default`]
///   matrix is the identity.
/// - [`matrices`] has constructors for rotations, translations and camera transforms.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(row, col)` tuples. Indices are 0-based,
/// and indexing out of bounds panics, just like it does for slices.
///
/// ```
/// # use ortho::*;
/// let mut mat = Mat3::from_rows([
///     [0, 1, 2],
///     [3, 4, 5],
///     [6, 7, 8],
/// ]);
/// mat[(0, 0)] = 9;
/// assert_eq!(mat[(0, 0)], 9);
/// assert_eq!(mat[(1, 2)], 5);
/// assert_eq!(mat.as_column_major(), &[9, 3, 6, 1, 4, 7, 2, 5, 8]);
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Matrix<T, const N: usize>([[T; N]; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Matrix<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Matrix<T, N> {}

impl<T: Zero, const N: usize> Matrix<T, N> {
    const ZERO_COLUMN: [T; N] = [T::ZERO; N];

    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([Self::ZERO_COLUMN; N]);
}

impl<T: Zero + One> Matrix<T, 3> {
    /// The 3x3 identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        [T::ONE, T::ZERO, T::ZERO],
        [T::ZERO, T::ONE, T::ZERO],
        [T::ZERO, T::ZERO, T::ONE],
    ]);
}

impl<T: Zero + One> Matrix<T, 4> {
    /// The 4x4 identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        [T::ONE, T::ZERO, T::ZERO, T::ZERO],
        [T::ZERO, T::ONE, T::ZERO, T::ZERO],
        [T::ZERO, T::ZERO, T::ONE, T::ZERO],
        [T::ZERO, T::ZERO, T::ZERO, T::ONE],
    ]);
}

impl<T, const N: usize> Matrix<T, N> {
    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let rows = Mat3::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    ///     [6, 7, 8],
    /// ]);
    /// let columns = Mat3::from_columns([
    ///     [0, 3, 6],
    ///     [1, 4, 7],
    ///     [2, 5, 8],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, N>>>(rows: [U; N]) -> Self
    where
        T: Copy,
    {
        let rows = rows.map(|row| row.into());
        Self::from_fn(|row, col| rows[row][col])
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, N>>>(columns: [U; N]) -> Self {
        Self(columns.map(|col| col.into().into_array()))
    }

    /// Creates a [`Matrix`] by invoking a closure with the row and column of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let mat = Mat3::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    ///     [20, 21, 22],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| array::from_fn(|row| cb(row, col))))
    }

    /// Applies a closure to each element, returning a new matrix.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, N>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(&mut f)))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let mat = Mat3::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    ///     [6, 7, 8],
    /// ]);
    /// assert_eq!(mat.transpose(), Matrix::from_rows([
    ///     [0, 3, 6],
    ///     [1, 4, 7],
    ///     [2, 5, 8],
    /// ]));
    /// assert_eq!(mat.transpose().transpose(), mat);
    /// ```
    pub fn transpose(self) -> Self
    where
        T: Copy,
    {
        Self::from_fn(|row, col| self.0[row][col])
    }

    /// Returns row `row` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|col| self.0[col][row])
    }

    /// Returns column `col` as a [`Vector`].
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    pub fn column(&self, col: usize) -> Vector<T, N>
    where
        T: Copy,
    {
        self.0[col].into()
    }

    /// Returns the columns of this matrix.
    pub fn columns(&self) -> &[[T; N]; N] {
        &self.0
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(col).and_then(|col| col.get(row))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(col).and_then(|col| col.get_mut(row))
    }

    /// Returns the elements in column-major order, ready to be copied into a GPU buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let mut m = Mat4f::IDENTITY;
    /// matrices::make_translation4(&vec3(1.0, 2.0, 3.0), &mut m);
    /// assert_eq!(&m.as_column_major()[12..], &[1.0, 2.0, 3.0, 1.0]);
    /// ```
    pub fn as_column_major(&self) -> &[T]
    where
        T: bytemuck::Pod,
    {
        bytemuck::cast_slice(slice::from_ref(self))
    }

    /// Returns the diagonal elements.
    pub fn diagonal(&self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self.0[i][i])
    }
}

impl<T: Real, const N: usize> Matrix<T, N> {
    /// Returns the sum of the diagonal elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(Mat3f::IDENTITY.trace(), 3.0);
    /// ```
    pub fn trace(&self) -> f64 {
        matrices::trace(self)
    }
}

impl<T: Real> Matrix<T, 3> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> f64 {
        matrices::determinant3(self)
    }

    /// Returns the inverse of this matrix, or [`None`] if its determinant is exactly zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(Mat3d::IDENTITY.invert(), Some(Mat3d::IDENTITY));
    /// assert_eq!(Mat3d::ZERO.invert(), None);
    /// ```
    pub fn invert(&self) -> Option<Self> {
        let mut out = *self;
        matrices::invert3(self, &mut out).then_some(out)
    }
}

impl<T: Real> Matrix<T, 4> {
    /// Returns the [determinant] of the matrix.
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> f64 {
        matrices::determinant4(self)
    }

    /// Returns the inverse of this matrix, or [`None`] if its determinant is exactly zero.
    ///
    /// This creates a temporary [`MatrixContext`] on the stack. Code that inverts many matrices
    /// can call [`matrices::invert4`] with a reused context instead.
    pub fn invert(&self) -> Option<Self> {
        let mut ctx = MatrixContext::new();
        let mut out = *self;
        matrices::invert4(&mut ctx, self, &mut out).then_some(out)
    }
}

/// The default matrix is the identity.
impl<T: Zero + One> Default for Matrix<T, 3> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The default matrix is the identity.
impl<T: Zero + One> Default for Matrix<T, 4> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T, const N: usize>(&'a Matrix<T, N>, usize);

        impl<'a, T: fmt::Debug, const N: usize> fmt::Debug for FormatRow<'a, T, N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..N {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0 .0[col][self.1])?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        for row in 0..N {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

/// Prints one row per line, each with signed, fixed-decimal elements.
///
/// ```
/// # use ortho::*;
/// assert_eq!(
///     Mat3f::IDENTITY.to_string(),
///     "[+1.000000 +0.000000 +0.000000]\n\
///      [+0.000000 +1.000000 +0.000000]\n\
///      [+0.000000 +0.000000 +1.000000]",
/// );
/// ```
impl<T: Scalar + fmt::Display, const N: usize> fmt::Display for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            if row != 0 {
                f.write_str("\n")?;
            }
            fmt_fixed(f, self.row(row).as_slice())?;
        }
        Ok(())
    }
}
