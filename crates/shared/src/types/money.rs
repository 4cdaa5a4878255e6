//! Money in integer minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are whole fils (1/100 of a UAE dirham). Conversion to major
//! units happens only at presentation boundaries via [`Fils::to_major`].

use std::ops::{Add, Neg, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of fils in one dirham.
pub const FILS_PER_DIRHAM: i64 = 100;

/// A signed monetary amount in fils.
///
/// Serializes as a bare integer so stored and transmitted values never pass
/// through a floating-point representation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fils(pub i64);

impl Fils {
    /// Zero fils.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a raw fils value.
    #[must_use]
    pub const fn new(fils: i64) -> Self {
        Self(fils)
    }

    /// Creates an amount from whole dirhams.
    #[must_use]
    pub const fn from_dirhams(dirhams: i64) -> Self {
        Self(dirhams * FILS_PER_DIRHAM)
    }

    /// Returns the raw fils value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Negates the amount, returning `None` for `i64::MIN` fils.
    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.0.checked_neg() {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Sums `amounts`, returning `None` if any partial sum overflows.
    #[must_use]
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Converts to a major-unit decimal (dirhams) with scale 2.
    #[must_use]
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Formats the amount in major units with exactly two decimals.
    #[must_use]
    pub fn format_major(self) -> String {
        format!("{:.2}", self.to_major())
    }
}

impl std::fmt::Display for Fils {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_major())
    }
}

impl From<i64> for Fils {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// Operators are unchecked. Sums over stored amounts use the `checked_*`
// methods instead.
impl Add for Fils {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Fils {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Fils {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fils_zero() {
        assert!(Fils::ZERO.is_zero());
        assert!(!Fils::ZERO.is_negative());
        assert!(!Fils::ZERO.is_positive());
        assert_eq!(Fils::default(), Fils::ZERO);
    }

    #[test]
    fn test_fils_from_dirhams() {
        assert_eq!(Fils::from_dirhams(12), Fils::new(1200));
    }

    #[test]
    fn test_fils_arithmetic() {
        let total = Fils::new(10_000) - Fils::new(4_000);
        assert_eq!(total, Fils::new(6_000));
        let total = total + Fils::new(50) - Fils::new(100);
        assert_eq!(total, Fils::new(5_950));
        assert_eq!(-total, Fils::new(-5_950));
    }

    #[test]
    fn test_fils_checked_sum() {
        let amounts = [Fils::new(1), Fils::new(2), Fils::new(-5)];
        assert_eq!(Fils::checked_sum(amounts), Some(Fils::new(-2)));
        assert_eq!(Fils::checked_sum(std::iter::empty()), Some(Fils::ZERO));
    }

    #[test]
    fn test_fils_checked_sum_overflow() {
        let amounts = [Fils::new(i64::MAX), Fils::new(i64::MAX), Fils::new(3)];
        assert_eq!(Fils::checked_sum(amounts), None);
    }

    #[test]
    fn test_fils_checked_sum_does_not_recover_after_overflow() {
        // Wrapping arithmetic would land back on a small value here.
        let amounts = [Fils::new(i64::MAX), Fils::new(1), Fils::new(i64::MIN)];
        assert_eq!(Fils::checked_sum(amounts), None);
    }

    #[test]
    fn test_fils_checked_add_sub_neg() {
        assert_eq!(Fils::new(i64::MAX).checked_add(Fils::new(1)), None);
        assert_eq!(Fils::new(1).checked_add(Fils::new(2)), Some(Fils::new(3)));
        assert_eq!(Fils::new(i64::MIN).checked_sub(Fils::new(1)), None);
        assert_eq!(Fils::new(5).checked_sub(Fils::new(7)), Some(Fils::new(-2)));
        assert_eq!(Fils::new(i64::MIN).checked_neg(), None);
        assert_eq!(Fils::new(-9).checked_neg(), Some(Fils::new(9)));
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(5, "0.05")]
    #[case(1_050, "10.50")]
    #[case(123_456, "1234.56")]
    #[case(-300, "-3.00")]
    fn test_fils_format_major(#[case] fils: i64, #[case] expected: &str) {
        assert_eq!(Fils::new(fils).format_major(), expected);
        assert_eq!(Fils::new(fils).to_string(), expected);
    }

    #[test]
    fn test_fils_to_major() {
        assert_eq!(Fils::new(10_000).to_major(), dec!(100.00));
        assert_eq!(Fils::new(-1).to_major(), dec!(-0.01));
    }

    #[test]
    fn test_fils_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Fils::new(500)).unwrap(), "500");
        let parsed: Fils = serde_json::from_str("-200").unwrap();
        assert_eq!(parsed, Fils::new(-200));
    }
}
