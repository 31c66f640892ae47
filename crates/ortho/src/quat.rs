use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{quats, vec4, vector::fmt_fixed, Matrix, One, Real, Scalar, Vector, Zero, XYZW};

mod ops;

/// A quaternion with [`f32`] components.
pub type Quatf = Quat<f32>;
/// A quaternion with [`f64`] components.
pub type Quatd = Quat<f64>;

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Unit-length quaternions ("*versors*") are commonly used to represent rotations in 3D space.
///
/// Quaternions are represented similar to a 4-dimensional vector, with an `x`, `y`, `z` and `w`
/// component that can be accessed as fields. The `x`, `y`, and `z` components correspond to the
/// `i`, `j`, and `k` imaginary parts, while `w` is the real part.
///
/// Unit length is never enforced. Operations that only make sense for rotations (like
/// [`Quat::to_matrix3`]) silently produce a scaled or skewed result for other quaternions.
///
/// The methods here are shorthands for the operations in [`quats`], which also work with other
/// quaternion storage.
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Quat<T>(Vector<T, 4>);

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

impl<T: Zero + One> Quat<T> {
    /// The multiplicative identity.
    ///
    /// This is a unit quaternion that will not change a vector it is multiplied with.
    pub const IDENTITY: Self = Self(vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE));
}

impl<T: Zero> Quat<T> {
    pub const ZERO: Self = Self(Vector::ZERO);
}

impl<T> Quat<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self(vec4(x, y, z, w))
    }

    /// Creates a quaternion from a 4-dimensional [`Vector`] of `x`, `y`, `z` and `w`.
    pub const fn from_vector(vec: Vector<T, 4>) -> Self {
        Self(vec)
    }

    pub fn into_vector(self) -> Vector<T, 4> {
        self.0
    }

    pub const fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    pub fn into_array(self) -> [T; 4] {
        self.0.into_array()
    }
}

impl<T: Real> Quat<T> {
    /// Creates a quaternion rotating by `angle` radians around the unit vector `axis`.
    pub fn from_axis_angle(axis: Vector<T, 3>, angle: f64) -> Self {
        let mut q = Self::IDENTITY;
        quats::from_axis_angle(&axis, angle, &mut q);
        q
    }

    pub fn from_rotation_x(radians: f64) -> Self {
        Self::from_axis_angle(Vector::<T, 3>::X, radians)
    }

    pub fn from_rotation_y(radians: f64) -> Self {
        Self::from_axis_angle(Vector::<T, 3>::Y, radians)
    }

    pub fn from_rotation_z(radians: f64) -> Self {
        Self::from_axis_angle(Vector::<T, 3>::Z, radians)
    }

    /// Creates a quaternion representing a rotation around the X, Y, and Z axis, in sequence.
    #[doc(alias = "euler")]
    pub fn from_rotation_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::from_rotation_z(z) * Self::from_rotation_y(y) * Self::from_rotation_x(x)
    }

    /// Converts a 3x3 rotation matrix to a quaternion.
    pub fn from_matrix3(m: &Matrix<T, 3>) -> Self {
        let mut q = Self::IDENTITY;
        quats::from_matrix3(m, &mut q);
        q
    }

    /// Converts the rotation part of a 4x4 matrix to a quaternion.
    ///
    /// See [`quats::from_matrix4`] for the elements that are ignored.
    pub fn from_matrix4(m: &Matrix<T, 4>) -> Self {
        let mut q = Self::IDENTITY;
        quats::from_matrix4(m, &mut q);
        q
    }

    pub fn to_matrix3(&self) -> Matrix<T, 3> {
        let mut m = Matrix::<T, 3>::IDENTITY;
        quats::to_matrix3(self, &mut m);
        m
    }

    pub fn to_matrix4(&self) -> Matrix<T, 4> {
        let mut m = Matrix::<T, 4>::IDENTITY;
        quats::to_matrix4(self, &mut m);
        m
    }

    /// Returns the conjugate of this quaternion, which is the inverse rotation if `self` has unit
    /// length.
    pub fn conjugate(self) -> Self {
        let mut q = self;
        quats::conjugate_in_place(&mut q);
        q
    }

    pub fn dot(self, other: Self) -> f64 {
        quats::dot(&self, &other)
    }

    /// Returns the squared length of this quaternion.
    ///
    /// If the squared length is not equal to one, multiplying a vector with this quaternion will
    /// scale the vector in addition to rotating it.
    pub fn magnitude_squared(&self) -> f64 {
        quats::magnitude_squared(self)
    }

    /// Returns the length of this quaternion.
    #[doc(alias = "norm", alias = "length")]
    pub fn magnitude(&self) -> f64 {
        quats::magnitude(self)
    }

    /// Returns a normalized copy of this quaternion (whose length equals one).
    ///
    /// The zero quaternion is returned unchanged.
    pub fn normalize(self) -> Self {
        let mut q = self;
        quats::normalize_in_place(&mut q);
        q
    }

    /// Spherically interpolates between `self` (at `t = 0`) and `other` (at `t = 1`).
    pub fn slerp(self, other: Self, t: f64) -> Self {
        let mut q = self;
        quats::slerp(&self, &other, t, &mut q);
        q
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(&self, v: Vector<T, 3>) -> Vector<T, 3> {
        let mut out = v;
        quats::rotate_vector(self, &v, &mut out);
        out
    }
}

impl<T: Zero + One> Default for Quat<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T> From<[T; 4]> for Quat<T> {
    fn from(arr: [T; 4]) -> Self {
        Self(arr.into())
    }
}

impl<T> From<Vector<T, 4>> for Quat<T> {
    fn from(vec: Vector<T, 4>) -> Self {
        Self(vec)
    }
}

impl<T> Deref for Quat<T> {
    type Target = XYZW<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Quat<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.0.as_array();
        f.debug_tuple("Quat")
            .field(x)
            .field(y)
            .field(z)
            .field(w)
            .finish()
    }
}

/// Prints `[x y z w]`, formatted like [`Vector`].
impl<T: Scalar + fmt::Display> fmt::Display for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, self.as_slice())
    }
}
