use std::ops::{Add, Mul, Neg, Sub};

use crate::{quats, Quat, Real, Vector};

impl<T, U> PartialEq<Quat<U>> for Quat<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Quat<U>) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for Quat<T> {}

impl<T: Neg> Neg for Quat<T> {
    type Output = Quat<T::Output>;

    fn neg(self) -> Self::Output {
        Quat::from_vector(-self.0)
    }
}

impl<T: Real> Add for Quat<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        quats::add(&self, &rhs, &mut out);
        out
    }
}

impl<T: Real> Sub for Quat<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        quats::subtract(&self, &rhs, &mut out);
        out
    }
}

/// Hamilton product.
///
/// For rotations, `a * b` applies `b` first.
impl<T: Real> Mul for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = self;
        quats::multiply(&self, &rhs, &mut out);
        out
    }
}

/// Quaternion * Scalar.
impl<T: Real> Mul<T> for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        quats::scale(&self, rhs.widen(), &mut out);
        out
    }
}

/// Rotates a vector.
impl<T: Real> Mul<Vector<T, 3>> for Quat<T> {
    type Output = Vector<T, 3>;

    fn mul(self, rhs: Vector<T, 3>) -> Self::Output {
        self.rotate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, Quatd, Quatf, Vec3f};

    #[test]
    fn operators() {
        let a = Quatd::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Quatd::ZERO);
        assert_eq!(-a, Quatd::new(-1.0, -2.0, -3.0, -4.0));
        assert_eq!(a * Quatd::IDENTITY, a);
        assert_eq!(Quatd::IDENTITY * a, a);
    }

    #[test]
    fn hamilton_is_not_commutative() {
        let a = Quatd::from_rotation_x(1.0);
        let b = Quatd::from_rotation_y(1.0);
        assert_ne!(a * b, b * a);
        assert_approx_eq!((a * b).magnitude(), 1.0);
    }

    #[test]
    fn rotate_vector() {
        let q = Quatf::from_rotation_z(std::f64::consts::PI);
        assert_approx_eq!(q * Vec3f::X, -Vec3f::X).abs(1e-6);
    }
}
