//! VAT rate classification and basis-point arithmetic.

use daftar_shared::Fils;
use serde::{Deserialize, Serialize};

/// 100% expressed in basis points.
pub const BASIS_POINTS_SCALE: i64 = 10_000;

/// UAE standard VAT rate (5%) in basis points.
pub const STANDARD_RATE_BASIS_POINTS: u16 = 500;

/// VAT treatment of a supply or purchase line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRate {
    /// Standard-rated at 5%.
    Standard,
    /// Taxable at 0% (exports, international transport).
    ZeroRated,
    /// Outside the taxable base (residential rent, some financial services).
    Exempt,
}

impl VatRate {
    /// Returns the rate in basis points, or `None` for exempt supplies.
    #[must_use]
    pub const fn basis_points(self) -> Option<u16> {
        match self {
            Self::Standard => Some(STANDARD_RATE_BASIS_POINTS),
            Self::ZeroRated => Some(0),
            Self::Exempt => None,
        }
    }

    /// Returns true if the line belongs to the taxable base.
    #[must_use]
    pub const fn is_taxable(self) -> bool {
        self.basis_points().is_some()
    }

    /// Computes the VAT due on a net amount at this rate.
    ///
    /// Exempt and zero-rated lines always yield zero.
    #[must_use]
    pub fn vat_on(self, net: Fils) -> Fils {
        match self.basis_points() {
            Some(bp) => apply_basis_points(net, bp),
            None => Fils::ZERO,
        }
    }

    /// Returns the storage/wire name of this rate.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ZeroRated => "zero_rated",
            Self::Exempt => "exempt",
        }
    }
}

impl std::str::FromStr for VatRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "zero_rated" => Ok(Self::ZeroRated),
            "exempt" => Ok(Self::Exempt),
            _ => Err(format!("Unknown VAT rate: {s}")),
        }
    }
}

/// Multiplies `amount` by `bp / 10000`, rounding half away from zero to the
/// nearest fil.
#[must_use]
pub fn apply_basis_points(amount: Fils, bp: u16) -> Fils {
    let scale = i128::from(BASIS_POINTS_SCALE);
    let product = i128::from(amount.value()) * i128::from(bp);
    let quotient = product / scale;
    let remainder = product % scale;
    let rounded = if remainder.abs() * 2 >= scale {
        quotient + product.signum()
    } else {
        quotient
    };
    // bp is at most 65535, so the result can exceed i64 only for absurd inputs.
    Fils::new(i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(10_000, 500)]
    #[case(4_000, 200)]
    #[case(1, 0)]
    #[case(10, 1)]
    #[case(9, 0)]
    #[case(30, 2)]
    #[case(-10, -1)]
    #[case(-9, 0)]
    fn test_standard_rate(#[case] net: i64, #[case] vat: i64) {
        assert_eq!(VatRate::Standard.vat_on(Fils::new(net)), Fils::new(vat));
    }

    #[test]
    fn test_zero_rated_and_exempt_yield_zero() {
        let net = Fils::new(123_456);
        assert_eq!(VatRate::ZeroRated.vat_on(net), Fils::ZERO);
        assert_eq!(VatRate::Exempt.vat_on(net), Fils::ZERO);
    }

    #[test]
    fn test_taxable_base() {
        assert!(VatRate::Standard.is_taxable());
        assert!(VatRate::ZeroRated.is_taxable());
        assert!(!VatRate::Exempt.is_taxable());
    }

    #[test]
    fn test_rate_parse() {
        assert_eq!(VatRate::from_str("ZERO_RATED"), Ok(VatRate::ZeroRated));
        assert!(VatRate::from_str("reduced").is_err());
    }

    #[test]
    fn test_full_scale_is_identity() {
        assert_eq!(apply_basis_points(Fils::new(987), 10_000), Fils::new(987));
    }

    proptest! {
        /// VAT is never larger than the exact value by more than half a fil.
        #[test]
        fn prop_rounding_error_below_half_fil(net in -1_000_000_000i64..1_000_000_000i64) {
            let vat = VatRate::Standard.vat_on(Fils::new(net)).value();
            let exact_times_scale = i128::from(net) * 500;
            let error = (i128::from(vat) * 10_000 - exact_times_scale).abs();
            prop_assert!(error <= 5_000);
        }

        /// Rounding is symmetric around zero.
        #[test]
        fn prop_rounding_is_symmetric(net in 0i64..1_000_000_000i64) {
            let positive = VatRate::Standard.vat_on(Fils::new(net));
            let negative = VatRate::Standard.vat_on(Fils::new(-net));
            prop_assert_eq!(positive, -negative);
        }
    }
}
