//! Scratch space for operations that need temporaries.
//!
//! None of the operations in this crate allocate. The few that need more temporary storage than
//! comfortably fits in their own stack frame, or that compose other operations, take a context
//! argument instead. A context holds no state between calls: every operation overwrites whatever
//! it needs.
//!
//! Contexts are borrowed mutably, so one context cannot be used by two operations at the same
//! time. To perform work on several threads, give each thread its own context:
//!
//! ```
//! # use ortho::*;
//! use std::thread;
//!
//! let matrices = [Mat4d::IDENTITY, Mat4d::IDENTITY * 2.0];
//! thread::scope(|s| {
//!     for m in &matrices {
//!         s.spawn(move || {
//!             let mut ctx = Context4d::new();
//!             let mut inv = Mat4d::ZERO;
//!             assert!(matrices::invert4(&mut ctx, m, &mut inv));
//!         });
//!     }
//! });
//! ```

use crate::{Matrix, Real, Vector};

/// Scratch storage for the `N`x`N` matrix operations in [`matrices`][crate::matrices].
///
/// Used by [`invert4`], the elementary row operations and [`look_at4`]. A 3x3 context only
/// serves the row operations.
///
/// [`invert4`]: crate::matrices::invert4
/// [`look_at4`]: crate::matrices::look_at4
#[derive(Debug, Clone)]
pub struct MatrixContext<T, const N: usize> {
    pub(crate) rows: [Vector<T, N>; 2],
    /// Minors and cofactors are always computed in `f64`.
    pub(crate) minor: Matrix<f64, 3>,
    pub(crate) cofactors: Matrix<f64, N>,
    /// The two factors of the combined view matrix. Only [`look_at4`] writes them, so they are
    /// unused in a 3x3 context.
    ///
    /// [`look_at4`]: crate::matrices::look_at4
    pub(crate) rotation: Matrix<T, N>,
    pub(crate) translation: Matrix<T, N>,
}

/// Scratch storage for 3x3 [`f32`] matrix operations.
pub type Context3f = MatrixContext<f32, 3>;
/// Scratch storage for 3x3 [`f64`] matrix operations.
pub type Context3d = MatrixContext<f64, 3>;
/// Scratch storage for 4x4 [`f32`] matrix operations.
pub type Context4f = MatrixContext<f32, 4>;
/// Scratch storage for 4x4 [`f64`] matrix operations.
pub type Context4d = MatrixContext<f64, 4>;

impl<T: Real, const N: usize> MatrixContext<T, N> {
    pub fn new() -> Self {
        Self {
            rows: [Vector::ZERO; 2],
            minor: Matrix::ZERO,
            cofactors: Matrix::ZERO,
            rotation: Matrix::ZERO,
            translation: Matrix::ZERO,
        }
    }
}

impl<T: Real, const N: usize> Default for MatrixContext<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scratch storage for the quaternion operations in [`quats`][crate::quats] that go through a
/// matrix, such as [`quats::look_at`][crate::quats::look_at].
///
/// Contains a nested [`MatrixContext`] for the matrix operations it delegates to.
#[derive(Debug, Clone)]
pub struct QuatContext<T> {
    pub(crate) matrices: MatrixContext<T, 4>,
    pub(crate) view: Matrix<T, 4>,
}

/// Scratch storage for [`f32`] quaternion operations.
pub type QuatContextf = QuatContext<f32>;
/// Scratch storage for [`f64`] quaternion operations.
pub type QuatContextd = QuatContext<f64>;

impl<T: Real> QuatContext<T> {
    pub fn new() -> Self {
        Self {
            matrices: MatrixContext::new(),
            view: Matrix::ZERO,
        }
    }

    /// Returns the nested matrix context, so that a caller holding a [`QuatContext`] does not need
    /// a separate [`MatrixContext`] for 4x4 matrix operations.
    pub fn matrices(&mut self) -> &mut MatrixContext<T, 4> {
        &mut self.matrices
    }
}

impl<T: Real> Default for QuatContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::{matrices, vec3, Context3d, Context4d, Mat3d, Mat4d, Vec3d};

    #[test]
    fn reused_context_gives_same_results() {
        let mut ctx = Context4d::new();
        let mut first = Mat4d::ZERO;
        matrices::look_at4(&mut ctx, &vec3(1.0, 2.0, 3.0), &Vec3d::ZERO, &Vec3d::Y, &mut first);

        let mut inv = Mat4d::ZERO;
        assert!(matrices::invert4(&mut ctx, &first, &mut inv));

        let mut again = Mat4d::ZERO;
        matrices::look_at4(&mut ctx, &vec3(1.0, 2.0, 3.0), &Vec3d::ZERO, &Vec3d::Y, &mut again);
        assert_eq!(again, first);

        let mut fresh = Mat4d::ZERO;
        matrices::look_at4(
            &mut Context4d::new(),
            &vec3(1.0, 2.0, 3.0),
            &Vec3d::ZERO,
            &Vec3d::Y,
            &mut fresh,
        );
        assert_eq!(fresh, first);
    }

    #[test]
    fn row_operations_leave_view_factors_alone() {
        let mut ctx = Context3d::new();
        let mut m = Mat3d::IDENTITY;
        matrices::exchange_rows_in_place(&mut ctx, &mut m, 0, 2);
        matrices::scale_row_in_place(&mut ctx, &mut m, 1, 2.0);
        assert_eq!(m, Mat3d::from_rows([[0.0, 0.0, 1.0], [0.0, 2.0, 0.0], [1.0, 0.0, 0.0]]));

        assert_eq!(ctx.rotation, Mat3d::ZERO);
        assert_eq!(ctx.translation, Mat3d::ZERO);
    }
}
