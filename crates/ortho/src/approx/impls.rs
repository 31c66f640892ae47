use crate::{Matrix, Quat, Vector};

use super::ApproxEq;

macro_rules! float_approx_eq {
    ($($t:ty),+) => {
        $(
            impl ApproxEq for $t {
                type Tolerance = Self;

                fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self) -> bool {
                    if !self.is_finite() || !other.is_finite() {
                        // `inf == inf`, `inf != -inf`, `NaN != NaN`
                        return self == other;
                    }

                    (self - other).abs() <= abs_tolerance
                }

                fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self) -> bool {
                    if !self.is_finite() || !other.is_finite() {
                        return self == other;
                    }

                    let largest = self.abs().max(other.abs());
                    (self - other).abs() <= largest * rel_tolerance
                }

                fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
                    if self.is_nan() || other.is_nan() {
                        return false;
                    }
                    if self.is_sign_negative() != other.is_sign_negative() {
                        return self == other; // -0.0 == +0.0
                    }

                    let diff = self.to_bits().abs_diff(other.to_bits());
                    diff <= ulps_tolerance.into()
                }
            }
        )+
    };
}
float_approx_eq!(f32, f64);

impl<'a, T: ApproxEq<U> + ?Sized, U: ?Sized> ApproxEq<U> for &'a T {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &U, abs_tolerance: Self::Tolerance) -> bool {
        T::abs_diff_eq(self, other, abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &U, rel_tolerance: Self::Tolerance) -> bool {
        T::rel_diff_eq(self, other, rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &U, ulps_tolerance: u32) -> bool {
        T::ulps_diff_eq(self, other, ulps_tolerance)
    }
}

impl<T: ApproxEq<U>, U> ApproxEq<[U]> for [T] {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &[U], abs_tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.abs_diff_eq(b, abs_tolerance))
    }

    fn rel_diff_eq(&self, other: &[U], rel_tolerance: Self::Tolerance) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.rel_diff_eq(b, rel_tolerance))
    }

    fn ulps_diff_eq(&self, other: &[U], ulps_tolerance: u32) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.ulps_diff_eq(b, ulps_tolerance))
    }
}

/// Forwards all three comparisons to the `[T]` impl via `$as_slice`.
macro_rules! slice_approx_eq {
    (impl[$($gen:tt)*] $ty:ty => $as_slice:ident) => {
        impl<$($gen)*> ApproxEq for $ty {
            type Tolerance = T::Tolerance;

            fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
                self.$as_slice().abs_diff_eq(other.$as_slice(), abs_tolerance)
            }

            fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
                self.$as_slice().rel_diff_eq(other.$as_slice(), rel_tolerance)
            }

            fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
                self.$as_slice().ulps_diff_eq(other.$as_slice(), ulps_tolerance)
            }
        }
    };
}

slice_approx_eq!(impl[T: ApproxEq, const N: usize] [T; N] => as_slice);
slice_approx_eq!(impl[T: ApproxEq, const N: usize] Vector<T, N> => as_slice);
slice_approx_eq!(impl[T: ApproxEq, const N: usize] Matrix<T, N> => columns);
slice_approx_eq!(impl[T: ApproxEq] Quat<T> => as_slice);

#[cfg(test)]
mod tests {
    use crate::{assert_approx_eq, assert_approx_ne, vec3, Mat3d, Quatf, Vec3d};

    #[test]
    fn vectors() {
        assert_approx_eq!(vec3(0.1 + 0.2, 1.0, -1.0), vec3(0.3, 1.0, -1.0));
        assert_approx_ne!(Vec3d::X, Vec3d::Y);
        assert_approx_eq!(Vec3d::X, Vec3d::Y).abs(1.0);
    }

    #[test]
    fn matrices() {
        let mut m = Mat3d::IDENTITY;
        m[(2, 1)] = 1e-12;
        assert_approx_ne!(m, Mat3d::IDENTITY);
        assert_approx_eq!(m, Mat3d::IDENTITY).abs(1e-9);
    }

    #[test]
    fn quats() {
        assert_approx_eq!(Quatf::IDENTITY, Quatf::new(0.0, 0.0, 1e-9, 1.0));
        assert_approx_ne!(Quatf::IDENTITY, -Quatf::IDENTITY);
    }
}
