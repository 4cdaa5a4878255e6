//! Reporting periods and ISO date handling.
//!
//! Every aggregation is scoped to a company plus either a closed date range
//! or an as-of cursor. Both ends of a range are inclusive.

use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Asia::Dubai;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Input is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid {field} '{value}': expected an ISO date (YYYY-MM-DD)")]
    InvalidDate {
        /// Name of the offending parameter.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// Start date falls after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Rejects unpadded components, times, and impossible dates like
/// `2025-02-30`.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDate`] naming `field` when parsing fails.
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, PeriodError> {
    let invalid = || PeriodError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Returns today's date in the UAE (Asia/Dubai).
#[must_use]
pub fn today_in_uae() -> NaiveDate {
    Utc::now().with_timezone(&Dubai).date_naive()
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidRange`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two ISO date strings.
    ///
    /// Both dates are validated before the ordering check.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed date or a reversed range.
    pub fn parse(
        start_field: &'static str,
        start: &str,
        end_field: &'static str,
        end: &str,
    ) -> Result<Self, PeriodError> {
        let start = parse_iso_date(start_field, start)?;
        let end = parse_iso_date(end_field, end)?;
        Self::new(start, end)
    }

    /// Calendar year to date: January 1 of `today`'s year through `today`.
    #[must_use]
    pub fn year_to_date(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }

    /// The calendar quarter containing `date`.
    #[must_use]
    pub fn quarter_containing(date: NaiveDate) -> Self {
        let first_month = (date.month0() / 3) * 3 + 1;
        let start = NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(3))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the date `days` after the end of the range.
    #[must_use]
    pub fn days_after_end(&self, days: u64) -> NaiveDate {
        self.end
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Scope of a ledger read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    /// Every line dated on or before the cursor.
    AsOf {
        /// Cursor date (inclusive).
        date: NaiveDate,
    },
    /// Every line inside the range.
    Range {
        /// Inclusive range.
        range: DateRange,
    },
}

impl Period {
    /// Creates an as-of period.
    #[must_use]
    pub const fn as_of(date: NaiveDate) -> Self {
        Self::AsOf { date }
    }

    /// Creates a range period.
    #[must_use]
    pub const fn range(range: DateRange) -> Self {
        Self::Range { range }
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn start(&self) -> Option<NaiveDate> {
        match self {
            Self::AsOf { .. } => None,
            Self::Range { range } => Some(range.start),
        }
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        match self {
            Self::AsOf { date } => *date,
            Self::Range { range } => range.end,
        }
    }

    /// Returns true if `date` is inside the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::AsOf { date: cursor } => date <= *cursor,
            Self::Range { range } => range.contains(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_iso_date_valid() {
        assert_eq!(parse_iso_date("as_of", "2025-03-31"), Ok(d(2025, 3, 31)));
        assert_eq!(parse_iso_date("as_of", "2024-02-29"), Ok(d(2024, 2, 29)));
    }

    #[rstest]
    #[case("")]
    #[case("2025-3-31")]
    #[case("31/03/2025")]
    #[case("2025-02-30")]
    #[case("2025-13-01")]
    #[case("2025-03-31T00:00:00")]
    #[case("20250331")]
    #[case("abcd-ef-gh")]
    #[case("+025-03-31")]
    fn test_parse_iso_date_rejects(#[case] raw: &str) {
        let err = parse_iso_date("as_of", raw).unwrap_err();
        assert_eq!(
            err,
            PeriodError::InvalidDate {
                field: "as_of",
                value: raw.to_string()
            }
        );
    }

    #[test]
    fn test_range_rejects_reversed() {
        let err = DateRange::new(d(2025, 4, 1), d(2025, 3, 31)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidRange { .. }));
    }

    #[test]
    fn test_range_single_day_is_valid() {
        let range = DateRange::new(d(2025, 4, 1), d(2025, 4, 1)).unwrap();
        assert!(range.contains(d(2025, 4, 1)));
        assert!(!range.contains(d(2025, 4, 2)));
    }

    #[test]
    fn test_range_parse_validates_dates_before_order() {
        let err = DateRange::parse("start_date", "2025-12-31", "end_date", "bogus").unwrap_err();
        assert!(matches!(err, PeriodError::InvalidDate { field: "end_date", .. }));
    }

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 3, 31)).unwrap();
        assert!(range.contains(d(2025, 1, 1)));
        assert!(range.contains(d(2025, 3, 31)));
        assert!(!range.contains(d(2024, 12, 31)));
        assert!(!range.contains(d(2025, 4, 1)));
    }

    #[test]
    fn test_year_to_date() {
        let ytd = DateRange::year_to_date(d(2025, 8, 14));
        assert_eq!(ytd.start(), d(2025, 1, 1));
        assert_eq!(ytd.end(), d(2025, 8, 14));
    }

    #[rstest]
    #[case(d(2025, 1, 1), d(2025, 1, 1), d(2025, 3, 31))]
    #[case(d(2025, 5, 20), d(2025, 4, 1), d(2025, 6, 30))]
    #[case(d(2025, 9, 30), d(2025, 7, 1), d(2025, 9, 30))]
    #[case(d(2024, 12, 31), d(2024, 10, 1), d(2024, 12, 31))]
    fn test_quarter_containing(
        #[case] date: NaiveDate,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
    ) {
        let quarter = DateRange::quarter_containing(date);
        assert_eq!((quarter.start(), quarter.end()), (start, end));
    }

    #[test]
    fn test_days_after_end() {
        let q1 = DateRange::new(d(2025, 1, 1), d(2025, 3, 31)).unwrap();
        assert_eq!(q1.days_after_end(28), d(2025, 4, 28));
    }

    #[test]
    fn test_period_as_of_contains_everything_before_cursor() {
        let period = Period::as_of(d(2025, 6, 30));
        assert!(period.contains(d(2019, 1, 1)));
        assert!(period.contains(d(2025, 6, 30)));
        assert!(!period.contains(d(2025, 7, 1)));
        assert_eq!(period.start(), None);
        assert_eq!(period.end(), d(2025, 6, 30));
    }

    #[test]
    fn test_period_range_bounds() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        let period = Period::range(range);
        assert_eq!(period.start(), Some(d(2025, 1, 1)));
        assert_eq!(period.end(), d(2025, 1, 31));
    }
}
