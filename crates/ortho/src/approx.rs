//! Approximate equality.
//!
//! `==` on the value types of this crate is always an exact, element-wise comparison. Everything
//! that needs a tolerance goes through this module instead:
//!
//! - [`ApproxEq`] is implemented by the element types and by [`Vector`], [`Matrix`] and [`Quat`].
//! - [`ApproxContext`] bundles an absolute and a relative tolerance and is passed to the
//!   `almost_equal` functions of [`vectors`], [`matrices`] and [`quats`].
//! - [`assert_approx_eq!`] and [`assert_approx_ne!`] are test assertions with configurable
//!   tolerances.
//!
//! [`Vector`]: crate::Vector
//! [`Matrix`]: crate::Matrix
//! [`Quat`]: crate::Quat
//! [`vectors`]: crate::vectors
//! [`matrices`]: crate::matrices
//! [`quats`]: crate::quats
//! [`assert_approx_eq!`]: crate::assert_approx_eq
//! [`assert_approx_ne!`]: crate::assert_approx_ne

mod impls;

use std::{fmt, panic::Location};

/// Types that can be compared for *approximate equality*.
///
/// Compound types are approximately equal when all of their elements are.
///
/// See <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>
/// for the trade-offs between the three comparison methods.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// The tolerance type, [`f32`] or [`f64`] depending on the compared elements.
    type Tolerance: DefaultTolerances + Copy;

    /// Returns whether `self` and `other` differ by at most `abs_tolerance`.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// Returns whether `self` and `other` differ by at most `rel_tolerance` times the larger of
    /// their magnitudes.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;

    /// Returns whether there are at most `ulps_tolerance` representable values between `self`
    /// and `other` ([*units in the last place*]).
    ///
    /// `NaN` never compares equal. `-0.0` and `+0.0` are equal, any other pair of values with
    /// different signs is not.
    ///
    /// [*units in the last place*]: https://en.wikipedia.org/wiki/Unit_in_the_last_place
    fn ulps_diff_eq(&self, other: &Rhs, ulps_tolerance: u32) -> bool;
}

/// Default tolerances of an [`ApproxEq::Tolerance`] type.
///
/// These are used by [`ApproxContext::default`] and by the assertion macros when no tolerance is
/// configured explicitly.
pub trait DefaultTolerances {
    const DEFAULT_ABS_TOLERANCE: Self;
    const DEFAULT_REL_TOLERANCE: Self;
    const DEFAULT_ULPS_TOLERANCE: u32;
}

impl DefaultTolerances for f32 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

impl DefaultTolerances for f64 {
    const DEFAULT_ABS_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_REL_TOLERANCE: Self = Self::EPSILON;
    const DEFAULT_ULPS_TOLERANCE: u32 = 4;
}

/// Tolerances for an *almost equal* comparison.
///
/// Two values are almost equal if they pass the absolute comparison *or* the relative comparison.
/// The absolute tolerance handles values near zero, where relative error is meaningless; the
/// relative tolerance handles everything else.
///
/// A context is built once by the caller and passed to `vectors::almost_equal`,
/// `matrices::almost_equal` or `quats::almost_equal`.
///
/// # Examples
///
/// ```
/// # use ortho::{*, approx::ApproxContext};
/// let ctx = ApproxContext::new(0.0, 1e-6);
/// assert!(vectors::almost_equal(&ctx, &vec2(1000.0, 1.0), &vec2(1000.0001, 1.0)));
/// assert!(!vectors::almost_equal(&ctx, &vec2(1000.0, 1.0), &vec2(1000.01, 1.0)));
///
/// // Exact comparison is unaffected.
/// assert_ne!(vec2(1000.0, 1.0), vec2(1000.0001, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxContext<T> {
    abs: T,
    rel: T,
}

impl<T: Copy> ApproxContext<T> {
    pub const fn new(abs: T, rel: T) -> Self {
        Self { abs, rel }
    }

    pub fn abs_tolerance(&self) -> T {
        self.abs
    }

    pub fn rel_tolerance(&self) -> T {
        self.rel
    }

    /// Compares two values with the tolerances of this context.
    pub fn almost_equal<A>(&self, a: &A, b: &A) -> bool
    where
        A: ApproxEq<Tolerance = T> + ?Sized,
    {
        a.abs_diff_eq(b, self.abs) || a.rel_diff_eq(b, self.rel)
    }
}

impl<T: DefaultTolerances> Default for ApproxContext<T> {
    fn default() -> Self {
        Self {
            abs: T::DEFAULT_ABS_TOLERANCE,
            rel: T::DEFAULT_REL_TOLERANCE,
        }
    }
}

/// Assertion guard returned by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// The assertion is checked when the guard is dropped. Before that, [`Asserter::abs`],
/// [`Asserter::rel`] and [`Asserter::ulps`] select the comparisons to perform. The values are
/// considered equal if *any* selected comparison says so.
///
/// If none of them is called, the values are compared with [`ApproxContext::default`].
pub struct Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    left: &'a T,
    right: &'a T,
    kind: AssertionKind,
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<T::Tolerance>,
    rel: Option<T::Tolerance>,
    ulps: Option<u32>,
}

impl<'a, T> Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a T,
        right: &'a T,
        kind: AssertionKind,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            kind,
            location: Location::caller(),
            msg,
            abs: None,
            rel: None,
            ulps: None,
        }
    }

    /// Compares the absolute difference of the values against `abs`.
    ///
    /// Works well for values close to zero, including values of opposite sign.
    pub fn abs(&mut self, abs: T::Tolerance) -> &mut Self {
        self.abs = Some(abs);
        self
    }

    /// Compares the absolute difference of the values against `rel` times the larger magnitude.
    ///
    /// Works well for values that are not close to zero. A non-zero value only compares equal to
    /// zero with a relative tolerance of at least 1.0.
    pub fn rel(&mut self, rel: T::Tolerance) -> &mut Self {
        self.rel = Some(rel);
        self
    }

    /// Counts the representable values between the two values and compares that against `ulps`.
    ///
    /// Does not work for values close to zero with opposite sign, since those are billions of
    /// ULPs apart.
    pub fn ulps(&mut self, ulps: u32) -> &mut Self {
        self.ulps = Some(ulps);
        self
    }

    fn equal(&self) -> bool {
        if self.abs.is_none() && self.rel.is_none() && self.ulps.is_none() {
            return ApproxContext::default().almost_equal(self.left, self.right);
        }

        self.abs
            .map_or(false, |abs| self.left.abs_diff_eq(self.right, abs))
            || self
                .rel
                .map_or(false, |rel| self.left.rel_diff_eq(self.right, rel))
            || self
                .ulps
                .map_or(false, |ulps| self.left.ulps_diff_eq(self.right, ulps))
    }
}

impl<'a, T> Drop for Asserter<'a, T>
where
    T: ApproxEq + fmt::Debug,
{
    // `#[track_caller]` has no effect on `drop`, so the location is captured in `new` and printed
    // as part of the message.
    fn drop(&mut self) {
        let equal = self.equal();
        let failed = match self.kind {
            AssertionKind::Eq => !equal,
            AssertionKind::Ne => equal,
        };
        if failed {
            assert_failed(self.left, self.right, self.kind, self.location, self.msg);
        }
    }
}

fn assert_failed(
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    kind: AssertionKind,
    location: &Location<'_>,
    msg: Option<fmt::Arguments<'_>>,
) -> ! {
    let op = match kind {
        AssertionKind::Eq => "==",
        AssertionKind::Ne => "!=",
    };
    match msg {
        Some(msg) => panic!(
            "assertion `left {op} right` failed at {location}: {msg}\n  left: {left:?}\n right: {right:?}"
        ),
        None => panic!(
            "assertion `left {op} right` failed at {location}\n  left: {left:?}\n right: {right:?}"
        ),
    }
}

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionKind {
    Eq,
    Ne,
}

/// Asserts that two expressions are approximately equal (using [`ApproxEq`]).
///
/// Works like [`assert_eq!`], but returns an [`Asserter`] that selects the comparison method and
/// tolerance.
///
/// # Examples
///
/// ```
/// # use ortho::*;
/// let one = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(one, 1.0);
///
/// assert_approx_eq!(100.0, 99.0).abs(1.0);
/// assert_approx_eq!(100.0, 99.0).rel(0.01);
/// assert_approx_eq!(1.0, 1.0 + f64::EPSILON).ulps(1);
///
/// assert_approx_eq!(vec2(0.1 + 0.2, 1.0), vec2(0.3, 1.0));
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Eq,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Asserts that two expressions are *not* approximately equal (using [`ApproxEq`]).
///
/// Counterpart of [`assert_approx_eq!`].
///
/// ```
/// # use ortho::*;
/// assert_approx_ne!(100.0, 99.0).abs(0.5);
/// assert_approx_ne!(1.0, 1.0 + 2.0 * f64::EPSILON).ulps(1);
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::None,
        )
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            $crate::approx::AssertionKind::Ne,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}
