use std::{array, fmt};

use crate::{vectors, One, Real, Scalar, Zero};

mod ops;
mod view;

pub use view::{XY, XYZ, XYZW};

/// A 2-dimensional vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 3-dimensional vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 4-dimensional vector.
pub type Vec4<T> = Vector<T, 4>;

/// A 2-dimensional vector with [`f32`] elements.
pub type Vec2f = Vec2<f32>;
/// A 3-dimensional vector with [`f32`] elements.
pub type Vec3f = Vec3<f32>;
/// A 4-dimensional vector with [`f32`] elements.
pub type Vec4f = Vec4<f32>;

/// A 2-dimensional vector with [`f64`] elements.
pub type Vec2d = Vec2<f64>;
/// A 3-dimensional vector with [`f64`] elements.
pub type Vec3d = Vec3<f64>;
/// A 4-dimensional vector with [`f64`] elements.
pub type Vec4d = Vec4<f64>;

/// A 2-dimensional vector with [`i64`] elements.
pub type Vec2l = Vec2<i64>;
/// A 3-dimensional vector with [`i64`] elements.
pub type Vec3l = Vec3<i64>;
/// A 4-dimensional vector with [`i64`] elements.
pub type Vec4l = Vec4<i64>;

/// An `N`-element vector storing elements of type `T`.
///
/// # Construction
///
/// - The freestanding [`vec2`], [`vec3`] and [`vec4`] functions create vectors from their
///   elements.
/// - [`Vector::splat`] copies one value into every element.
/// - [`Vector::from_fn`] invokes a closure with the index of each element.
/// - Arrays convert into vectors via [`From`].
/// - [`Vector::ZERO`] has all elements set to zero, and `Vector::X`, `Vector::Y`, `Vector::Z` and
///   `Vector::W` are the unit axes.
/// - The [`Default`] vector is zero, except that 4-element vectors have `w = 1`, which makes them
///   a homogeneous point at the origin.
///
/// # Element Access
///
/// - Elements can be accessed as fields `x`, `y`, `z` and `w`, or by [`Index`] like an array.
/// - [`Vector::as_array`], [`Vector::as_slice`] and [`Vector::into_array`] expose the elements.
/// - [`bytemuck::Zeroable`] and [`bytemuck::Pod`] are implemented when `T` implements them.
///
/// # Arithmetic
///
/// The [`std::ops`] operators are provided for convenience. For integer elements they follow the
/// usual Rust overflow rules (they panic in debug builds only). The functions in [`vectors`]
/// always check integer arithmetic and also work on types other than [`Vector`].
///
/// [`Index`]: std::ops::Index
#[derive(Clone, Copy, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Zero, const N: usize> Vector<T, N> {
    /// A vector with every element set to [`T::ZERO`][Zero::ZERO].
    pub const ZERO: Self = Self([T::ZERO; N]);
}

impl<T: Zero + One> Vector<T, 2> {
    pub const X: Self = Self([T::ONE, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 3> {
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO]);
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE]);
}

impl<T: Zero + One> Vector<T, 4> {
    pub const X: Self = Self([T::ONE, T::ZERO, T::ZERO, T::ZERO]);
    pub const Y: Self = Self([T::ZERO, T::ONE, T::ZERO, T::ZERO]);
    pub const Z: Self = Self([T::ZERO, T::ZERO, T::ONE, T::ZERO]);
    pub const W: Self = Self([T::ZERO, T::ZERO, T::ZERO, T::ONE]);
}

impl<T, const N: usize> Vector<T, N> {
    /// Creates a vector with each element initialized to `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let v = Vector::splat(2);
    /// assert_eq!(v, vec3(2, 2, 2));
    /// ```
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([elem; N])
    }

    /// Creates a vector where each element is initialized by invoking a closure with its index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let v = Vector::from_fn(|i| i + 100);
    /// assert_eq!(v, vec3(100, 101, 102));
    /// ```
    #[inline]
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    /// Applies a closure to each element, returning a new vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let v = vec3(1, 2, 3).map(|i| i as f32 * 0.5);
    /// assert_eq!(v, vec3(0.5, 1.0, 1.5));
    /// ```
    pub fn map<F, U>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Pairs up the elements of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let v = vec2(1, 2).zip(vec2('a', 'b'));
    /// assert_eq!(v, vec2((1, 'a'), (2, 'b')));
    /// ```
    pub fn zip<U>(self, other: Vector<U, N>) -> Vector<(T, U), N>
    where
        T: Copy,
        U: Copy,
    {
        Vector::from_fn(|i| (self.0[i], other.0[i]))
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// Converts this [`Vector`] into an `N`-element array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec3(1, 2, 3).into_array(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Computes the dot product of `self` and `other`, in the accumulator type of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec3(1, 3, -5).dot(vec3(4, -2, -1)), 3);
    ///
    /// let d: f64 = Vec2f::X.dot(Vec2f::Y);
    /// assert_eq!(d, 0.0);
    /// ```
    pub fn dot(self, other: Self) -> T::Accum {
        vectors::dot(&self, &other)
    }

    /// Returns the squared length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec2(4, 3).magnitude_squared(), 25);
    /// ```
    pub fn magnitude_squared(self) -> T::Accum {
        vectors::magnitude_squared(&self)
    }

    /// Element-wise minimum of `self` and `other`.
    pub fn min(self, other: Self) -> Self {
        let mut out = self;
        vectors::clamp_maximum_by_vector(&self, &other, &mut out);
        out
    }

    /// Element-wise maximum of `self` and `other`.
    pub fn max(self, other: Self) -> Self {
        let mut out = self;
        vectors::clamp_minimum_by_vector(&self, &other, &mut out);
        out
    }

    /// Clamps each element of `self` between the corresponding elements of `min` and `max`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// let v = vec3(-1.0, 0.5, 7.0).clamp(Vec3d::ZERO, Vector::splat(1.0));
    /// assert_eq!(v, vec3(0.0, 0.5, 1.0));
    /// ```
    pub fn clamp(mut self, min: Self, max: Self) -> Self {
        vectors::clamp_by_vector_in_place(&mut self, &min, &max);
        self
    }
}

impl<T: Real, const N: usize> Vector<T, N> {
    /// Returns the length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec2(3.0, 4.0).magnitude(), 5.0);
    /// ```
    #[doc(alias = "length")]
    pub fn magnitude(self) -> f64 {
        vectors::magnitude(&self)
    }

    /// Returns a vector with the same direction as `self` and a length of 1.
    ///
    /// The zero vector is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec3(0.0, 0.0, 4.0).normalize(), Vec3d::Z);
    /// assert_eq!(Vec3f::ZERO.normalize(), Vec3f::ZERO);
    /// ```
    pub fn normalize(mut self) -> Self {
        vectors::normalize_in_place(&mut self);
        self
    }

    pub fn distance(self, other: Self) -> f64 {
        vectors::distance(&self, &other)
    }

    /// Computes the angle between `self` and `other`, in radians.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// assert_approx_eq!(Vec3f::Y.angle_to(Vec3f::X), FRAC_PI_2);
    /// assert_approx_eq!(vec2(1.0, 1.0).angle_to(vec2(1.0, -1.0)), FRAC_PI_2);
    /// ```
    pub fn angle_to(self, other: Self) -> f64 {
        vectors::angle(&self, &other)
    }

    /// Linearly interpolates between `self` (at `alpha = 0`) and `other` (at `alpha = 1`).
    pub fn lerp(self, other: Self, alpha: f64) -> Self {
        let mut out = self;
        vectors::interpolate_linear(&self, &other, alpha, &mut out);
        out
    }
}

impl<T> Vector<T, 2> {
    /// Appends `value`, yielding a 3-dimensional vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec2(-1.0, 2.0).extend(5.0), vec3(-1.0, 2.0, 5.0));
    /// ```
    pub fn extend(self, value: T) -> Vector<T, 3> {
        let [x, y] = self.0;
        Vector([x, y, value])
    }

    /// Computes the [perpendicular dot product] of `self` and `other`.
    ///
    /// This is the Z coordinate of the cross product of both vectors extended with `z = 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(Vec2l::X.perp_dot(Vec2l::Y), 1);
    /// assert_eq!(Vec2l::Y.perp_dot(Vec2l::X), -1);
    /// ```
    ///
    /// [perpendicular dot product]: https://mathworld.wolfram.com/PerpDotProduct.html
    pub fn perp_dot(self, other: Self) -> T
    where
        T: Scalar,
    {
        self.extend(T::ZERO).cross(other.extend(T::ZERO))[2]
    }
}

impl<T> Vector<T, 3> {
    /// Removes the last element, yielding a 2-dimensional vector.
    pub fn truncate(self) -> Vector<T, 2> {
        let [x, y, _] = self.0;
        Vector([x, y])
    }

    /// Appends `value`, yielding a 4-dimensional vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec3(-1.0, 2.0, 3.5).extend(1.0), vec4(-1.0, 2.0, 3.5, 1.0));
    /// ```
    pub fn extend(self, value: T) -> Vector<T, 4> {
        let [x, y, z] = self.0;
        Vector([x, y, z, value])
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(Vec3f::X.cross(Vec3f::Y), Vec3f::Z);
    /// assert_eq!(Vec3f::Y.cross(Vec3f::X), -Vec3f::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self
    where
        T: Scalar,
    {
        let mut out = self;
        vectors::cross(&self, &other, &mut out);
        out
    }
}

impl<T> Vector<T, 4> {
    /// Removes the last element, yielding a 3-dimensional vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ortho::*;
    /// assert_eq!(vec4(1, 2, 3, 4).truncate(), vec3(1, 2, 3));
    /// ```
    pub fn truncate(self) -> Vector<T, 3> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<T: Zero> Default for Vector<T, 2> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<T: Zero> Default for Vector<T, 3> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

/// The default 4-vector is `(0, 0, 0, 1)`, the homogeneous coordinates of the origin.
impl<T: Zero + One> Default for Vector<T, 4> {
    #[inline]
    fn default() -> Self {
        Self::W
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self(value)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(value: Vector<T, N>) -> Self {
        value.0
    }
}

impl<T, const N: usize> AsRef<[T]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> AsMut<[T]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("");
        for elem in &self.0 {
            tup.field(elem);
        }
        tup.finish()
    }
}

/// Prints the elements with a sign and a fixed number of decimal places.
///
/// The default number of decimal places is [`Scalar::DISPLAY_DIGITS`]; a precision given in the
/// format string (`{:.3}`) overrides it.
///
/// ```
/// # use ortho::*;
/// assert_eq!(vec2(1.0f32, -0.5).to_string(), "[+1.000000 -0.500000]");
/// assert_eq!(format!("{:.2}", vec3(0.0, 1.0, 2.0)), "[+0.00 +1.00 +2.00]");
/// assert_eq!(vec2(3i64, -4).to_string(), "[+3 -4]");
/// ```
impl<T: Scalar + fmt::Display, const N: usize> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(f, &self.0)
    }
}

pub(crate) fn fmt_fixed<T: Scalar + fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    elems: &[T],
) -> fmt::Result {
    let digits = f.precision().unwrap_or(T::DISPLAY_DIGITS);
    f.write_str("[")?;
    for (i, elem) in elems.iter().enumerate() {
        if i != 0 {
            f.write_str(" ")?;
        }
        write!(f, "{elem:+.digits$}")?;
    }
    f.write_str("]")
}

/// Constructs a [`Vec2`] from its two elements.
#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

/// Constructs a [`Vec3`] from its three elements.
#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

/// Constructs a [`Vec4`] from its four elements.
#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn access() {
        assert_eq!(Vec3f::X.x, 1.0);
        assert_eq!(Vec3f::X[0], 1.0);
        assert_eq!(Vec3f::X.y, 0.0);
        assert_eq!(Vec3f::Y.y, 1.0);
        assert_eq!(Vec4f::W.w, 1.0);

        let mut v = vec2(0, 1);
        v.x = 777;
        assert_eq!(v[0], 777);
        v[1] = 9;
        assert_eq!(v.y, 9);
        assert_eq!(v, [777, 9]);
    }

    #[test]
    fn defaults() {
        assert_eq!(Vec2d::default(), [0.0, 0.0]);
        assert_eq!(Vec3l::default(), [0, 0, 0]);
        assert_eq!(Vec4f::default(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn fmt() {
        assert_eq!(format!("{}", Vec4d::W), "[+0.000000000000000 +0.000000000000000 +0.000000000000000 +1.000000000000000]");
        assert_eq!(format!("{}", Vec2f::X), "[+1.000000 +0.000000]");
        assert_eq!(format!("{:?}", Vec4f::W), "(0.0, 0.0, 0.0, 1.0)");
    }

    #[test]
    fn methods_match_functions() {
        let a = vec3(1.0, -2.0, 0.5);
        let b = vec3(0.25, 4.0, 2.0);
        assert_eq!(a.dot(b), vectors::dot(&a, &b));
        assert_eq!(a.cross(b), {
            let mut out = Vec3d::ZERO;
            vectors::cross(&a, &b, &mut out);
            out
        });
        assert_eq!(a.min(b), vec3(0.25, -2.0, 0.5));
        assert_eq!(a.max(b), vec3(1.0, 4.0, 2.0));
    }

    #[test]
    fn angle() {
        assert_approx_eq!(Vec3f::Y.angle_to(Vec3f::X), FRAC_PI_2);
        assert_approx_eq!(Vec3f::Y.angle_to(-Vec3f::X), FRAC_PI_2);
        assert_approx_eq!(vec2(0.0, 2.0).angle_to(vec2(-3.0, 0.0)), FRAC_PI_2);
        assert_eq!(Vec3d::Y.angle_to(Vec3d::Y), 0.0);
    }

    #[test]
    fn truncate_extend() {
        assert_eq!(vec4(1, 2, 3, 4).truncate().truncate(), vec2(1, 2));
        assert_eq!(vec2(1, 2).extend(3).extend(4), vec4(1, 2, 3, 4));
    }

    #[test]
    fn pod() {
        let v = [vec2(1.0f32, 2.0), vec2(3.0, 4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&v[..]);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }
}
