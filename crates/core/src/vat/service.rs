//! VAT summary computation.

use daftar_shared::Fils;

use super::rate::VatRate;
use super::types::{VatDirection, VatLine, VatSummary};
use crate::period::DateRange;
use crate::reports::ReportError;

/// Service for computing VAT positions.
pub struct VatService;

impl VatService {
    /// Aggregates output and input VAT for every line dated inside `range`.
    ///
    /// Lines outside the range are ignored, so the result depends only on
    /// the range and the lines given.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if a bucket or the net position
    /// overflows.
    pub fn summarize(range: DateRange, lines: &[VatLine]) -> Result<VatSummary, ReportError> {
        let mut summary = VatSummary::empty(range);

        for line in lines.iter().filter(|l| range.contains(l.date)) {
            let vat = line.vat();
            summary.line_count += 1;

            match (line.direction, line.rate) {
                (VatDirection::Output, VatRate::Standard) => {
                    accumulate(&mut summary.standard_rated_supplies, line.net_amount)?;
                    accumulate(&mut summary.output_vat, vat)?;
                }
                (VatDirection::Output, VatRate::ZeroRated) => {
                    accumulate(&mut summary.zero_rated_supplies, line.net_amount)?;
                }
                (VatDirection::Output, VatRate::Exempt) => {
                    accumulate(&mut summary.exempt_supplies, line.net_amount)?;
                }
                (VatDirection::Input, VatRate::Standard) => {
                    accumulate(&mut summary.standard_rated_expenses, line.net_amount)?;
                    accumulate(&mut summary.input_vat, vat)?;
                }
                (VatDirection::Input, VatRate::ZeroRated) => {
                    accumulate(&mut summary.zero_rated_expenses, line.net_amount)?;
                }
                (VatDirection::Input, VatRate::Exempt) => {
                    accumulate(&mut summary.exempt_expenses, line.net_amount)?;
                }
            }
        }

        summary.taxable_supplies = summary
            .standard_rated_supplies
            .checked_add(summary.zero_rated_supplies)
            .ok_or(ReportError::Overflow)?;
        summary.net_payable = summary
            .output_vat
            .checked_sub(summary.input_vat)
            .ok_or(ReportError::Overflow)?;
        Ok(summary)
    }
}

fn accumulate(bucket: &mut Fils, amount: Fils) -> Result<(), ReportError> {
    *bucket = bucket.checked_add(amount).ok_or(ReportError::Overflow)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daftar_shared::types::DocumentId;
    use proptest::prelude::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn q1() -> DateRange {
        DateRange::new(d(1, 1), d(3, 31)).unwrap()
    }

    fn line(direction: VatDirection, date: NaiveDate, net: i64, rate: VatRate) -> VatLine {
        VatLine {
            document_id: DocumentId::new(),
            direction,
            date,
            net_amount: Fils::new(net),
            rate,
        }
    }

    #[test]
    fn test_sale_and_purchase_at_standard_rate() {
        let lines = vec![
            line(VatDirection::Output, d(2, 1), 10_000, VatRate::Standard),
            line(VatDirection::Input, d(2, 15), 4_000, VatRate::Standard),
        ];

        let summary = VatService::summarize(q1(), &lines).unwrap();

        assert_eq!(summary.output_vat, Fils::new(500));
        assert_eq!(summary.input_vat, Fils::new(200));
        assert_eq!(summary.net_payable, Fils::new(300));
        assert!(!summary.is_refund());
    }

    #[test]
    fn test_refund_position_is_valid() {
        let lines = vec![
            line(VatDirection::Output, d(1, 5), 1_000, VatRate::Standard),
            line(VatDirection::Input, d(1, 6), 50_000, VatRate::Standard),
        ];

        let summary = VatService::summarize(q1(), &lines).unwrap();

        assert_eq!(summary.net_payable, Fils::new(50 - 2_500));
        assert!(summary.is_refund());
    }

    #[test]
    fn test_zero_rated_and_exempt_contribute_no_vat() {
        let lines = vec![
            line(VatDirection::Output, d(1, 10), 8_000, VatRate::ZeroRated),
            line(VatDirection::Output, d(1, 11), 3_000, VatRate::Exempt),
            line(VatDirection::Input, d(1, 12), 2_000, VatRate::ZeroRated),
            line(VatDirection::Input, d(1, 13), 1_500, VatRate::Exempt),
        ];

        let summary = VatService::summarize(q1(), &lines).unwrap();

        assert_eq!(summary.output_vat, Fils::ZERO);
        assert_eq!(summary.input_vat, Fils::ZERO);
        assert_eq!(summary.net_payable, Fils::ZERO);
        assert_eq!(summary.zero_rated_supplies, Fils::new(8_000));
        assert_eq!(summary.exempt_supplies, Fils::new(3_000));
        assert_eq!(summary.zero_rated_expenses, Fils::new(2_000));
        assert_eq!(summary.exempt_expenses, Fils::new(1_500));
        assert_eq!(summary.taxable_supplies, Fils::new(8_000));
        assert_eq!(summary.line_count, 4);
    }

    #[test]
    fn test_range_is_inclusive() {
        let lines = vec![
            line(VatDirection::Output, d(1, 1), 10_000, VatRate::Standard),
            line(VatDirection::Output, d(3, 31), 10_000, VatRate::Standard),
            line(VatDirection::Output, d(4, 1), 10_000, VatRate::Standard),
            line(
                VatDirection::Output,
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                10_000,
                VatRate::Standard,
            ),
        ];

        let summary = VatService::summarize(q1(), &lines).unwrap();

        assert_eq!(summary.output_vat, Fils::new(1_000));
        assert_eq!(summary.line_count, 2);
    }

    #[test]
    fn test_overflowing_bucket_is_an_error() {
        let lines = vec![
            line(VatDirection::Output, d(1, 5), i64::MAX, VatRate::ZeroRated),
            line(VatDirection::Output, d(1, 6), 1, VatRate::ZeroRated),
        ];

        assert_eq!(
            VatService::summarize(q1(), &lines),
            Err(ReportError::Overflow)
        );
    }

    #[test]
    fn test_empty_period() {
        let summary = VatService::summarize(q1(), &[]).unwrap();
        assert_eq!(summary, crate::vat::VatSummary::empty(q1()));
        assert_eq!(summary.filing_due_date, d(4, 28));
    }

    fn rate_strategy() -> impl Strategy<Value = VatRate> {
        prop_oneof![
            Just(VatRate::Standard),
            Just(VatRate::ZeroRated),
            Just(VatRate::Exempt),
        ]
    }

    fn direction_strategy() -> impl Strategy<Value = VatDirection> {
        prop_oneof![Just(VatDirection::Output), Just(VatDirection::Input)]
    }

    proptest! {
        /// net_payable is always output minus input.
        #[test]
        fn prop_net_payable_identity(
            raw in prop::collection::vec(
                (direction_strategy(), 1u32..=90, 0i64..10_000_000, rate_strategy()),
                0..40,
            ),
        ) {
            let start = d(1, 1);
            let lines: Vec<VatLine> = raw
                .into_iter()
                .map(|(dir, offset, net, rate)| {
                    line(dir, start + chrono::Days::new(u64::from(offset)), net, rate)
                })
                .collect();

            let summary = VatService::summarize(q1(), &lines).unwrap();

            prop_assert_eq!(summary.net_payable, summary.output_vat - summary.input_vat);

            let expected_output = Fils::checked_sum(
                lines
                    .iter()
                    .filter(|l| q1().contains(l.date))
                    .filter(|l| l.direction == VatDirection::Output && l.rate == VatRate::Standard)
                    .map(VatLine::vat),
            );
            prop_assert_eq!(Some(summary.output_vat), expected_output);
        }

        /// Calling summarize twice yields identical results.
        #[test]
        fn prop_summarize_is_idempotent(
            raw in prop::collection::vec(
                (direction_strategy(), 0i64..1_000_000, rate_strategy()),
                0..20,
            ),
        ) {
            let lines: Vec<VatLine> = raw
                .into_iter()
                .map(|(dir, net, rate)| line(dir, d(2, 2), net, rate))
                .collect();
            prop_assert_eq!(
                VatService::summarize(q1(), &lines),
                VatService::summarize(q1(), &lines)
            );
        }
    }
}
