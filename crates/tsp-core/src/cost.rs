//! Numeric abstraction over edge costs.
//!
//! The solvers are generic over the cost type so that integer instances keep
//! exact arithmetic while float instances remain usable. All arithmetic that
//! feeds a bound goes through the checked operations here: integers report
//! overflow, floats report a non-finite result. Neither is ever silently
//! clamped.

use num_traits::Zero;
use std::fmt::{Debug, Display};

/// A non-negative edge cost.
pub trait Cost: Copy + PartialOrd + Zero + Debug + Display + Send + Sync + 'static {
    /// Returns `true` for every value other than NaN and the infinities.
    fn is_finite_cost(self) -> bool;

    /// Returns `true` if the value is negative. Always `false` for unsigned types.
    fn is_negative_cost(self) -> bool;

    /// Returns `true` if the value may appear in a distance matrix
    /// (finite and not negative).
    #[inline]
    fn is_valid_cost(self) -> bool {
        self.is_finite_cost() && !self.is_negative_cost()
    }

    /// Addition that yields `None` instead of overflowing or leaving the finite range.
    fn checked_add_cost(self, rhs: Self) -> Option<Self>;

    /// Subtraction that yields `None` instead of underflowing or leaving the finite range.
    fn checked_sub_cost(self, rhs: Self) -> Option<Self>;

    /// Sums the values, returning `None` on the first failing addition.
    #[inline]
    fn checked_sum<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        values
            .into_iter()
            .try_fold(Self::zero(), |acc, v| acc.checked_add_cost(v))
    }
}

macro_rules! unsigned_cost_impl {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            #[inline(always)]
            fn is_finite_cost(self) -> bool {
                true
            }

            #[inline(always)]
            fn is_negative_cost(self) -> bool {
                false
            }

            #[inline(always)]
            fn checked_add_cost(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            #[inline(always)]
            fn checked_sub_cost(self, rhs: Self) -> Option<Self> {
                self.checked_sub(rhs)
            }
        }
    )*};
}

macro_rules! signed_cost_impl {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            #[inline(always)]
            fn is_finite_cost(self) -> bool {
                true
            }

            #[inline(always)]
            fn is_negative_cost(self) -> bool {
                self < 0
            }

            #[inline(always)]
            fn checked_add_cost(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            #[inline(always)]
            fn checked_sub_cost(self, rhs: Self) -> Option<Self> {
                self.checked_sub(rhs)
            }
        }
    )*};
}

macro_rules! float_cost_impl {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            #[inline(always)]
            fn is_finite_cost(self) -> bool {
                self.is_finite()
            }

            #[inline(always)]
            fn is_negative_cost(self) -> bool {
                self < 0.0
            }

            #[inline(always)]
            fn checked_add_cost(self, rhs: Self) -> Option<Self> {
                let sum = self + rhs;
                sum.is_finite().then_some(sum)
            }

            #[inline(always)]
            fn checked_sub_cost(self, rhs: Self) -> Option<Self> {
                let diff = self - rhs;
                diff.is_finite().then_some(diff)
            }
        }
    )*};
}

unsigned_cost_impl!(u32, u64, usize);
signed_cost_impl!(i32, i64);
float_cost_impl!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_overflow_is_reported() {
        assert_eq!(u32::MAX.checked_add_cost(1), None);
        assert_eq!(i64::MAX.checked_add_cost(1), None);
        assert_eq!(3u64.checked_sub_cost(4), None);
        assert_eq!(7i32.checked_add_cost(8), Some(15));
    }

    #[test]
    fn test_float_non_finite_is_reported() {
        assert_eq!(f64::MAX.checked_add_cost(f64::MAX), None);
        assert_eq!(1.5f64.checked_add_cost(2.0), Some(3.5));
        assert_eq!(f32::NAN.checked_add_cost(1.0), None);
    }

    #[test]
    fn test_validity() {
        assert!(0u32.is_valid_cost());
        assert!(!(-1i32).is_valid_cost());
        assert!((-1i32).is_negative_cost());
        assert!(!f64::NAN.is_valid_cost());
        assert!(!f64::INFINITY.is_valid_cost());
        assert!(!f64::NAN.is_negative_cost());
        assert!(2.5f64.is_valid_cost());
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(u32::checked_sum([1, 2, 3]), Some(6));
        assert_eq!(u32::checked_sum([u32::MAX, 1]), None);
        assert_eq!(f64::checked_sum(std::iter::empty()), Some(0.0));
    }
}
