//! Report error types.

use chrono::NaiveDate;
use daftar_shared::AppError;
use thiserror::Error;

use crate::period::PeriodError;
use crate::source::SourceError;

/// Errors that can occur while answering a report query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A date parameter is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid {field} '{value}': expected an ISO date (YYYY-MM-DD)")]
    InvalidDate {
        /// Parameter name.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Company id does not resolve.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// The ledger store could not be reached.
    #[error("Ledger source unavailable: {0}")]
    SourceUnavailable(String),

    /// The ledger store returned rows that cannot be reported on.
    #[error("Inconsistent ledger data: {0}")]
    InvalidData(String),

    /// A balance or total does not fit in an `i64` of fils.
    #[error("Inconsistent ledger data: amount overflow")]
    Overflow,
}

impl ReportError {
    /// Returns true for errors answered with a zeroed report and a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::CompanyNotFound(_) | Self::SourceUnavailable(_))
    }

    /// Returns true for caller input errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidDate { .. } | Self::InvalidDateRange { .. })
    }
}

impl From<PeriodError> for ReportError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::InvalidDate { field, value } => Self::InvalidDate { field, value },
            PeriodError::InvalidRange { start, end } => Self::InvalidDateRange { start, end },
        }
    }
}

impl From<SourceError> for ReportError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unreachable(msg) => Self::SourceUnavailable(msg),
            SourceError::InvalidData(msg) => Self::InvalidData(msg),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else if err.is_validation() {
            Self::Validation(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
