//! Small fixed-size linear algebra: vectors, square matrices and quaternions.
//!
//! # Overview
//!
//! The crate has two layers.
//!
//! - Value types: [`Vector`] (2, 3 or 4 elements), [`Matrix`] (3x3 or 4x4, column-major) and
//!   [`Quat`], generic over the element type, with aliases for [`f32`] (`Vec3f`, `Mat4f`,
//!   `Quatf`), [`f64`] (`Vec3d`, `Mat4d`, `Quatd`) and, for vectors, [`i64`] (`Vec3l`). They
//!   implement the [`std::ops`] operators and have convenience methods.
//! - Operations: the [`vectors`], [`matrices`] and [`quats`] modules contain free functions that
//!   read their operands and write their result into a caller-provided output. None of them
//!   allocate. They are generic over the capability traits in [`access`], so they work with the
//!   value types, with plain arrays, and with views into caller-owned storage ([`buffer`]).
//!
//! Operations that need more scratch space than a few locals take a [`MatrixContext`] or
//! [`QuatContext`] argument. Contexts carry no state between calls; use one per thread.
//!
//! # Numerics
//!
//! - [`f32`] computations accumulate sums of products (dot products, matrix products,
//!   determinants) in [`f64`] and round once when storing the result.
//! - Integer vector arithmetic in [`vectors`] is checked. Overflow panics with
//!   [`Error::Overflow`], and `checked_*` variants return it instead.
//! - `==` is exact. Approximate comparison lives in [`approx`] (the [`assert_approx_eq!`] macro
//!   and the `almost_equal` functions).
//! - Degenerate inputs (normalizing a zero vector, a `look_at` with a parallel `up` vector,
//!   non-unit quaternions) never panic or return an error. They produce a well-defined but
//!   meaningless result.
//!
//! # Goals & Non-Goals
//!
//! - Don't support dynamically-sized vectors and matrices. Relying on const generics for the
//!   dimensions keeps the API small.
//! - Support only a single, column-major, unpadded data layout for matrices, matching what GPU
//!   APIs expect ([`Matrix::as_column_major`]).
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types.
//! - No SIMD and no dependencies beyond a few small, stable crates.
//!
//! # Examples
//!
//! ```
//! # use ortho::*;
//! let mut ctx = Context4d::new();
//!
//! let mut model = Mat4d::ZERO;
//! matrices::make_translation4(&vec3(1.0, 2.0, 3.0), &mut model);
//!
//! let mut inverse = Mat4d::ZERO;
//! assert!(matrices::invert4(&mut ctx, &model, &mut inverse));
//! assert_eq!(inverse * vec4(1.0, 2.0, 3.0, 1.0), Vec4d::W);
//! ```

pub mod access;
pub mod approx;
pub mod buffer;
pub mod context;
mod error;
pub mod matrices;
mod matrix;
mod quat;
pub mod quats;
mod traits;
mod vector;
pub mod vectors;

pub use context::*;
pub use error::Error;
pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
