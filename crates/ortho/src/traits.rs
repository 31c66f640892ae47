//! Numeric element traits.
//!
//! Every operation in this crate is written once, generic over the element type. The traits in
//! this module describe what an element type has to provide for each family of operations:
//!
//! - [`Number`] covers the basic field operations and is enough for the [`std::ops`] impls of the
//!   value types.
//! - [`Scalar`] adds overflow-checked arithmetic and an accumulator type, and is required by the
//!   vector operations (which also accept integer elements).
//! - [`Real`] is implemented by [`f32`] and [`f64`] only and is required by everything that needs
//!   square roots, trigonometry or division (matrices, quaternions, normalization, ...).

use std::{fmt, ops};

use crate::Error;

/// Types that support the trigonometric functions.
pub trait Trig: Sized {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    fn acos(self) -> Self;
    fn atan2(self, other: Self) -> Self;

    /// Computes sine and cosine of `self` at once.
    fn sin_cos(self) -> (Self, Self);
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively). Built-in integer types implement it in terms of
/// [`Ord::min`] and [`Ord::max`].
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// Element types accepted by the vector operations.
///
/// A [`Scalar`] has an associated *accumulator* type ([`Scalar::Accum`]) that sums, dot products
/// and scale factors are computed in. For [`f32`] this is [`f64`], so that single-precision
/// vectors still get double-precision dot products; every other type accumulates in itself.
///
/// Arithmetic performed by the vector operations goes through [`Scalar::add_exact`],
/// [`Scalar::sub_exact`] and [`Scalar::mul_exact`]. For floats these are the plain operators.
/// For integers they panic when the result does not fit, in release builds as well as in debug
/// builds. Nothing in this crate wraps silently.
pub trait Scalar: Number + MinMax + PartialOrd + fmt::Debug {
    /// The type that dot products and scale factors are computed in.
    type Accum: Scalar;

    /// Number of decimal places printed by the fixed-decimal [`Display`] impls of the value types.
    ///
    /// [`Display`]: fmt::Display
    const DISPLAY_DIGITS: usize;

    /// Converts `self` to the accumulator type. This never loses precision.
    fn widen(self) -> Self::Accum;

    /// Converts an accumulated value back to the element type.
    ///
    /// For [`f32`] this rounds to the nearest representable value.
    fn narrow(accum: Self::Accum) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// Adds `rhs` to `self`.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Overflow`] if the result is not representable.
    #[inline]
    #[track_caller]
    fn add_exact(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Some(v) => v,
            None => overflow("add"),
        }
    }

    /// Subtracts `rhs` from `self`.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Overflow`] if the result is not representable.
    #[inline]
    #[track_caller]
    fn sub_exact(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Some(v) => v,
            None => overflow("subtract"),
        }
    }

    /// Multiplies `self` with `rhs`.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::Overflow`] if the result is not representable.
    #[inline]
    #[track_caller]
    fn mul_exact(self, rhs: Self) -> Self {
        match self.checked_mul(rhs) {
            Some(v) => v,
            None => overflow("multiply"),
        }
    }
}

#[cold]
#[track_caller]
fn overflow(op: &'static str) -> ! {
    panic!("{}", Error::Overflow { op })
}

/// Floating-point element types.
///
/// All accumulation happens in [`f64`], regardless of the element type.
pub trait Real: Scalar<Accum = f64> + Sqrt + Trig {}

macro_rules! int_scalar {
    ($($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0;
            }

            impl One for $types {
                const ONE: Self = 1;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }

            impl Scalar for $types {
                type Accum = Self;
                const DISPLAY_DIGITS: usize = 0;

                #[inline]
                fn widen(self) -> Self {
                    self
                }

                #[inline]
                fn narrow(accum: Self) -> Self {
                    accum
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$types>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$types>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$types>::checked_mul(self, rhs)
                }
            }
        )+
    };
}
int_scalar!(i32, i64);

macro_rules! float_scalar {
    ($($types:ty => $digits:literal),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0.0;
            }

            impl One for $types {
                const ONE: Self = 1.0;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    self.min(other)
                }

                fn max(self, other: Self) -> Self {
                    self.max(other)
                }
            }

            impl Sqrt for $types {
                fn sqrt(self) -> Self {
                    self.sqrt()
                }
            }

            impl Trig for $types {
                fn sin(self) -> Self {
                    self.sin()
                }

                fn cos(self) -> Self {
                    self.cos()
                }

                fn acos(self) -> Self {
                    self.acos()
                }

                fn atan2(self, other: Self) -> Self {
                    self.atan2(other)
                }

                fn sin_cos(self) -> (Self, Self) {
                    self.sin_cos()
                }
            }

            impl Scalar for $types {
                type Accum = f64;
                const DISPLAY_DIGITS: usize = $digits;

                #[inline]
                fn widen(self) -> f64 {
                    self.into()
                }

                #[inline]
                fn narrow(accum: f64) -> Self {
                    accum as $types
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }
            }

            impl Real for $types {}
        )+
    };
}
float_scalar!(f32 => 6, f64 => 15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_narrow() {
        assert_eq!(0.1f32.widen(), 0.1f32 as f64);
        assert_eq!(f32::narrow(0.5), 0.5);
        assert_eq!(7i64.widen(), 7);
        assert_eq!(i64::narrow(-3), -3);
    }

    #[test]
    fn exact_arith() {
        assert_eq!(i64::MAX.checked_add(1), None);
        assert_eq!(Scalar::checked_sub(i64::MIN, 1), None);
        assert_eq!(Scalar::checked_mul(i64::MAX, 2), None);
        assert_eq!(40i64.add_exact(2), 42);
        assert_eq!(f32::MAX.add_exact(f32::MAX), f32::INFINITY);
    }

    #[test]
    #[should_panic(expected = "integer overflow during add")]
    fn add_exact_overflow() {
        i64::MAX.add_exact(1);
    }

    #[test]
    #[should_panic(expected = "integer overflow during multiply")]
    fn mul_exact_overflow() {
        i32::MIN.mul_exact(-1);
    }
}
