//! Read and write capabilities.
//!
//! The operations in [`vectors`], [`matrices`] and [`quats`] do not take the concrete value types
//! of this crate. They are generic over these traits, which describe the minimal element access an
//! operation needs: inputs are bounded by a `Read*` trait, outputs by a `Write*` trait, and in-place
//! operations by both.
//!
//! The value types ([`Vector`], [`Matrix`], [`Quat`]) implement them, and so do plain arrays and
//! the storage-backed views in [`buffer`]. Downstream code can implement them for its own storage
//! (eg. interleaved vertex data or a mapped GPU buffer) and pass it to the operations directly.
//!
//! ```
//! # use ortho::*;
//! // Plain arrays work wherever a vector or matrix is expected.
//! let mut out = [0.0f64; 3];
//! vectors::cross(&[1.0, 0.0, 0.0], &vec3(0.0, 1.0, 0.0), &mut out);
//! assert_eq!(out, [0.0, 0.0, 1.0]);
//! ```
//!
//! [`vectors`]: crate::vectors
//! [`matrices`]: crate::matrices
//! [`quats`]: crate::quats
//! [`buffer`]: crate::buffer

use crate::{Matrix, Quat, Vector};

/// Read access to the `N` elements of a vector.
pub trait ReadVector<T, const N: usize> {
    /// Returns the element at `index`.
    ///
    /// Implementations may panic if `index >= N`.
    fn get(&self, index: usize) -> T;

    /// Copies all elements into a [`Vector`].
    fn to_vector(&self) -> Vector<T, N> {
        Vector::from_fn(|i| self.get(i))
    }
}

/// Write access to the `N` elements of a vector.
pub trait WriteVector<T, const N: usize> {
    /// Overwrites the element at `index`.
    ///
    /// Implementations may panic if `index >= N`.
    fn set(&mut self, index: usize, value: T);

    /// Overwrites all elements with those of `value`.
    fn assign(&mut self, value: Vector<T, N>) {
        for (i, elem) in value.into_array().into_iter().enumerate() {
            self.set(i, elem);
        }
    }
}

/// Read access to the elements of an `N`x`N` matrix, addressed by `(row, column)`.
pub trait ReadMatrix<T, const N: usize> {
    /// Returns the element at `row`, `col`.
    fn get(&self, row: usize, col: usize) -> T;

    /// Returns row `row` as a [`Vector`].
    fn row(&self, row: usize) -> Vector<T, N> {
        Vector::from_fn(|col| self.get(row, col))
    }

    /// Returns column `col` as a [`Vector`].
    fn column(&self, col: usize) -> Vector<T, N> {
        Vector::from_fn(|row| self.get(row, col))
    }

    /// Copies all elements into a [`Matrix`].
    fn to_matrix(&self) -> Matrix<T, N> {
        Matrix::from_fn(|row, col| self.get(row, col))
    }
}

/// Write access to the elements of an `N`x`N` matrix, addressed by `(row, column)`.
pub trait WriteMatrix<T, const N: usize> {
    /// Overwrites the element at `row`, `col`.
    fn set(&mut self, row: usize, col: usize, value: T);

    /// Overwrites row `row` with the elements of `value`.
    fn set_row(&mut self, row: usize, value: Vector<T, N>) {
        for (col, elem) in value.into_array().into_iter().enumerate() {
            self.set(row, col, elem);
        }
    }

    /// Overwrites all elements with those of `value`.
    fn assign(&mut self, value: Matrix<T, N>)
    where
        T: Copy,
    {
        for row in 0..N {
            for col in 0..N {
                self.set(row, col, value[(row, col)]);
            }
        }
    }
}

/// Read access to the `x`, `y`, `z` and `w` components of a quaternion.
///
/// `x`, `y` and `z` are the imaginary (vector) part, `w` is the real (scalar) part.
pub trait ReadQuat<T> {
    fn x(&self) -> T;
    fn y(&self) -> T;
    fn z(&self) -> T;
    fn w(&self) -> T;

    /// Copies all components into a [`Quat`].
    fn to_quat(&self) -> Quat<T> {
        Quat::new(self.x(), self.y(), self.z(), self.w())
    }
}

/// Write access to the `x`, `y`, `z` and `w` components of a quaternion.
pub trait WriteQuat<T> {
    fn set_x(&mut self, x: T);
    fn set_y(&mut self, y: T);
    fn set_z(&mut self, z: T);
    fn set_w(&mut self, w: T);

    /// Overwrites all components with those of `value`.
    fn assign(&mut self, value: Quat<T>) {
        let [x, y, z, w] = value.into_array();
        self.set_x(x);
        self.set_y(y);
        self.set_z(z);
        self.set_w(w);
    }
}

impl<T: Copy, const N: usize> ReadVector<T, N> for Vector<T, N> {
    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline]
    fn to_vector(&self) -> Vector<T, N> {
        *self
    }
}

impl<T, const N: usize> WriteVector<T, N> for Vector<T, N> {
    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    #[inline]
    fn assign(&mut self, value: Vector<T, N>) {
        *self = value;
    }
}

impl<T: Copy, const N: usize> ReadVector<T, N> for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }
}

impl<T, const N: usize> WriteVector<T, N> for [T; N] {
    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T: Copy, const N: usize> ReadMatrix<T, N> for Matrix<T, N> {
    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }

    #[inline]
    fn to_matrix(&self) -> Matrix<T, N> {
        *self
    }
}

impl<T, const N: usize> WriteMatrix<T, N> for Matrix<T, N> {
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }

    #[inline]
    fn assign(&mut self, value: Matrix<T, N>)
    where
        T: Copy,
    {
        *self = value;
    }
}

/// Nested arrays are interpreted as an array of rows, matching how matrices are written down.
impl<T: Copy, const N: usize> ReadMatrix<T, N> for [[T; N]; N] {
    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self[row][col]
    }
}

/// Nested arrays are interpreted as an array of rows, matching how matrices are written down.
impl<T, const N: usize> WriteMatrix<T, N> for [[T; N]; N] {
    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) {
        self[row][col] = value;
    }
}

impl<T: Copy> ReadQuat<T> for Quat<T> {
    #[inline]
    fn x(&self) -> T {
        self.x
    }

    #[inline]
    fn y(&self) -> T {
        self.y
    }

    #[inline]
    fn z(&self) -> T {
        self.z
    }

    #[inline]
    fn w(&self) -> T {
        self.w
    }

    #[inline]
    fn to_quat(&self) -> Quat<T> {
        *self
    }
}

impl<T> WriteQuat<T> for Quat<T> {
    #[inline]
    fn set_x(&mut self, x: T) {
        self.x = x;
    }

    #[inline]
    fn set_y(&mut self, y: T) {
        self.y = y;
    }

    #[inline]
    fn set_z(&mut self, z: T) {
        self.z = z;
    }

    #[inline]
    fn set_w(&mut self, w: T) {
        self.w = w;
    }

    #[inline]
    fn assign(&mut self, value: Quat<T>) {
        *self = value;
    }
}

/// `[x, y, z, w]`.
impl<T: Copy> ReadQuat<T> for [T; 4] {
    fn x(&self) -> T {
        self[0]
    }

    fn y(&self) -> T {
        self[1]
    }

    fn z(&self) -> T {
        self[2]
    }

    fn w(&self) -> T {
        self[3]
    }
}

/// `[x, y, z, w]`.
impl<T> WriteQuat<T> for [T; 4] {
    fn set_x(&mut self, x: T) {
        self[0] = x;
    }

    fn set_y(&mut self, y: T) {
        self[1] = y;
    }

    fn set_z(&mut self, z: T) {
        self[2] = z;
    }

    fn set_w(&mut self, w: T) {
        self[3] = w;
    }
}

// Forwarding impls, so that `&v` and `&mut v` can be passed where `v` could.

impl<T, V: ReadVector<T, N> + ?Sized, const N: usize> ReadVector<T, N> for &V {
    fn get(&self, index: usize) -> T {
        V::get(self, index)
    }
}

impl<T, V: ReadVector<T, N> + ?Sized, const N: usize> ReadVector<T, N> for &mut V {
    fn get(&self, index: usize) -> T {
        V::get(self, index)
    }
}

impl<T, V: WriteVector<T, N> + ?Sized, const N: usize> WriteVector<T, N> for &mut V {
    fn set(&mut self, index: usize, value: T) {
        V::set(self, index, value)
    }
}

impl<T, M: ReadMatrix<T, N> + ?Sized, const N: usize> ReadMatrix<T, N> for &M {
    fn get(&self, row: usize, col: usize) -> T {
        M::get(self, row, col)
    }
}

impl<T, M: ReadMatrix<T, N> + ?Sized, const N: usize> ReadMatrix<T, N> for &mut M {
    fn get(&self, row: usize, col: usize) -> T {
        M::get(self, row, col)
    }
}

impl<T, M: WriteMatrix<T, N> + ?Sized, const N: usize> WriteMatrix<T, N> for &mut M {
    fn set(&mut self, row: usize, col: usize, value: T) {
        M::set(self, row, col, value)
    }
}

impl<T, Q: ReadQuat<T> + ?Sized> ReadQuat<T> for &Q {
    fn x(&self) -> T {
        Q::x(self)
    }

    fn y(&self) -> T {
        Q::y(self)
    }

    fn z(&self) -> T {
        Q::z(self)
    }

    fn w(&self) -> T {
        Q::w(self)
    }
}
