//! Reporting entity.

use daftar_shared::types::CompanyId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a UAE Tax Registration Number.
pub const TRN_LENGTH: usize = 15;

/// Errors raised when parsing a TRN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrnError {
    /// Wrong number of characters.
    #[error("TRN must be {TRN_LENGTH} digits, got {0}")]
    InvalidLength(usize),

    /// Contains a non-digit character.
    #[error("TRN must contain digits only")]
    NonDigit,
}

/// UAE Tax Registration Number (15 digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Trn(String);

impl Trn {
    /// Parses a TRN, ignoring spaces and dashes used for grouping.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly 15 ASCII digits remain.
    pub fn parse(raw: &str) -> Result<Self, TrnError> {
        let digits: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TrnError::NonDigit);
        }
        if digits.len() != TRN_LENGTH {
            return Err(TrnError::InvalidLength(digits.len()));
        }
        Ok(Self(digits))
    }

    /// Returns the normalized 15-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Trn {
    type Error = TrnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Trn> for String {
    fn from(trn: Trn) -> Self {
        trn.0
    }
}

impl std::fmt::Display for Trn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A company whose books are reported on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Legal name.
    pub name: String,
    /// VAT registration, if registered.
    pub trn: Option<Trn>,
    /// Reporting currency (ISO 4217).
    pub base_currency: String,
}

impl Company {
    /// Creates an AED company without a TRN.
    #[must_use]
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            trn: None,
            base_currency: "AED".to_string(),
        }
    }

    /// Returns true if the company is registered for VAT.
    #[must_use]
    pub fn is_vat_registered(&self) -> bool {
        self.trn.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trn_accepts_grouped_digits() {
        let trn = Trn::parse("100-2345-6789-0123").unwrap();
        assert_eq!(trn.as_str(), "100234567890123");
    }

    #[test]
    fn test_trn_rejects_wrong_length() {
        assert_eq!(Trn::parse("12345"), Err(TrnError::InvalidLength(5)));
    }

    #[test]
    fn test_trn_rejects_letters() {
        assert_eq!(Trn::parse("10023456789012A"), Err(TrnError::NonDigit));
    }

    #[test]
    fn test_trn_deserialize_validates() {
        let ok: Result<Trn, _> = serde_json::from_str("\"100234567890123\"");
        assert!(ok.is_ok());
        let bad: Result<Trn, _> = serde_json::from_str("\"42\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_company_defaults_to_aed() {
        let company = Company::new(CompanyId::new(), "Al Noor Trading LLC");
        assert_eq!(company.base_currency, "AED");
        assert!(!company.is_vat_registered());
    }
}
