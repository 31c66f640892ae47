//! Vectors and matrices that live inside a larger buffer.
//!
//! These types implement the capability traits from [`access`] on top of any storage that can be
//! viewed as a slice, so that operations can read from and write to eg. a vertex buffer or a
//! uniform buffer without copying the data into the value types first.
//!
//! [`access`]: crate::access

use std::marker::PhantomData;

use crate::access::{ReadMatrix, ReadVector, WriteMatrix, WriteVector};

/// An `N`-element vector stored at some offset inside a slice.
///
/// `S` can be anything that implements [`AsRef<[T]>`] (for read access) and [`AsMut<[T]>`] (for
/// write access), such as `&[T]`, `&mut [T]` or [`Vec<T>`].
///
/// # Examples
///
/// Normalizing the second position of an interleaved position/normal buffer in place:
///
/// ```
/// # use ortho::{*, buffer::VectorSlice};
/// let mut vertices = vec![
///     0.0, 0.0, 0.0, /* normal */ 0.0, 0.0, 1.0,
///     0.0, -8.0, 0.0, /* normal */ 0.0, 1.0, 0.0,
/// ];
/// let mut position = VectorSlice::<_, f64, 3>::new(&mut vertices[..], 6);
/// vectors::normalize_in_place(&mut position);
/// assert_eq!(&vertices[6..9], &[0.0, -1.0, 0.0]);
/// ```
pub struct VectorSlice<S, T, const N: usize> {
    storage: S,
    offset: usize,
    _p: PhantomData<fn() -> T>,
}

impl<S: AsRef<[T]>, T, const N: usize> VectorSlice<S, T, N> {
    /// Creates a view of the `N` elements of `storage` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `storage` does not contain `offset + N` elements.
    #[track_caller]
    pub fn new(storage: S, offset: usize) -> Self {
        let len = storage.as_ref().len();
        assert!(
            offset + N <= len,
            "vector of {N} elements at offset {offset} does not fit into buffer of length {len}"
        );
        Self {
            storage,
            offset,
            _p: PhantomData,
        }
    }

    /// Returns the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S: AsRef<[T]>, T: Copy, const N: usize> ReadVector<T, N> for VectorSlice<S, T, N> {
    fn get(&self, index: usize) -> T {
        assert!(index < N);
        self.storage.as_ref()[self.offset + index]
    }
}

impl<S: AsMut<[T]>, T, const N: usize> WriteVector<T, N> for VectorSlice<S, T, N> {
    fn set(&mut self, index: usize, value: T) {
        assert!(index < N);
        self.storage.as_mut()[self.offset + index] = value;
    }
}

/// An `N`x`N` matrix stored in column-major order at some offset inside a slice.
///
/// Column-major is the layout expected by OpenGL, Vulkan and WGSL uniform buffers, so a
/// [`MatrixSlice`] can be used as the output of a matrix operation to write the result directly
/// into a buffer that is about to be uploaded.
///
/// # Examples
///
/// ```
/// # use ortho::{*, buffer::MatrixSlice};
/// let mut uniforms = [0.0f32; 16];
/// let mut view = MatrixSlice::<_, f32, 4>::new(&mut uniforms[..], 0);
/// matrices::make_translation4(&vec3(1.0, 2.0, 3.0), &mut view);
///
/// // The translation ends up in the last column, which is stored last.
/// assert_eq!(&uniforms[12..], &[1.0, 2.0, 3.0, 1.0]);
/// ```
pub struct MatrixSlice<S, T, const N: usize> {
    storage: S,
    offset: usize,
    _p: PhantomData<fn() -> T>,
}

impl<S: AsRef<[T]>, T, const N: usize> MatrixSlice<S, T, N> {
    /// Creates a view of the `N * N` elements of `storage` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `storage` does not contain `offset + N * N` elements.
    #[track_caller]
    pub fn new(storage: S, offset: usize) -> Self {
        let len = storage.as_ref().len();
        assert!(
            offset + N * N <= len,
            "{N}x{N} matrix at offset {offset} does not fit into buffer of length {len}"
        );
        Self {
            storage,
            offset,
            _p: PhantomData,
        }
    }

    /// Returns the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < N && col < N);
        self.offset + col * N + row
    }
}

impl<S: AsRef<[T]>, T: Copy, const N: usize> ReadMatrix<T, N> for MatrixSlice<S, T, N> {
    fn get(&self, row: usize, col: usize) -> T {
        self.storage.as_ref()[self.index(row, col)]
    }
}

impl<S: AsRef<[T]> + AsMut<[T]>, T, const N: usize> WriteMatrix<T, N> for MatrixSlice<S, T, N> {
    fn set(&mut self, row: usize, col: usize, value: T) {
        let index = self.index(row, col);
        self.storage.as_mut()[index] = value;
    }
}
