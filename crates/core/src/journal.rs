//! Journal entries and lines.

use chrono::NaiveDate;
use daftar_shared::Fils;
use daftar_shared::types::{AccountId, CompanyId, JournalEntryId, JournalLineId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Entry has no lines.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// A line carries a negative amount.
    #[error("Line {0} has a negative amount")]
    NegativeAmount(usize),

    /// A line carries both a debit and a credit.
    #[error("Line {0} must be either a debit or a credit, not both")]
    BothSides(usize),

    /// A line carries neither a debit nor a credit.
    #[error("Line {0} has a zero amount")]
    ZeroAmount(usize),

    /// Entry has only debits or only credits.
    #[error("Journal entry must have both debit and credit lines")]
    SingleSided,

    /// Debits and credits differ.
    #[error("Journal entry is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debits.
        debits: Fils,
        /// Total credits.
        credits: Fils,
    },

    /// A line's company or date disagrees with its entry header.
    #[error("Line {0} does not match the entry's company or date")]
    HeaderMismatch(usize),

    /// Debit or credit total does not fit in an `i64` of fils.
    #[error("Journal entry totals overflow")]
    Overflow,
}

/// A single debit or credit posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Line ID.
    pub id: JournalLineId,
    /// Owning entry.
    pub entry_id: JournalEntryId,
    /// Company the line belongs to.
    pub company_id: CompanyId,
    /// Account posted to.
    pub account_id: AccountId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Debit amount (zero for credit lines).
    pub debit: Fils,
    /// Credit amount (zero for debit lines).
    pub credit: Fils,
    /// Optional line memo.
    pub memo: Option<String>,
}

impl JournalLine {
    /// Returns `debit - credit`, or `None` on overflow.
    #[must_use]
    pub const fn net_debit(&self) -> Option<Fils> {
        self.debit.checked_sub(self.credit)
    }
}

/// A balanced set of journal lines posted on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Company the entry belongs to.
    pub company_id: CompanyId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// External reference (invoice number, voucher number).
    pub reference: String,
    /// Narrative.
    pub description: String,
    /// Lines.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Starts an empty entry.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        entry_date: NaiveDate,
        reference: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            company_id,
            entry_date,
            reference: reference.into(),
            description: description.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a debit line.
    #[must_use]
    pub fn debit(self, account_id: AccountId, amount: Fils) -> Self {
        self.line(account_id, amount, Fils::ZERO)
    }

    /// Appends a credit line.
    #[must_use]
    pub fn credit(self, account_id: AccountId, amount: Fils) -> Self {
        self.line(account_id, Fils::ZERO, amount)
    }

    fn line(mut self, account_id: AccountId, debit: Fils, credit: Fils) -> Self {
        self.lines.push(JournalLine {
            id: JournalLineId::new(),
            entry_id: self.id,
            company_id: self.company_id,
            account_id,
            entry_date: self.entry_date,
            debit,
            credit,
            memo: None,
        });
        self
    }

    /// Sum of debit lines, or `None` on overflow.
    #[must_use]
    pub fn total_debit(&self) -> Option<Fils> {
        Fils::checked_sum(self.lines.iter().map(|l| l.debit))
    }

    /// Sum of credit lines, or `None` on overflow.
    #[must_use]
    pub fn total_credit(&self) -> Option<Fils> {
        Fils::checked_sum(self.lines.iter().map(|l| l.credit))
    }

    /// Validates the double-entry invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is empty, single-sided, unbalanced, or
    /// contains a malformed line.
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.lines.is_empty() {
            return Err(JournalError::NoLines);
        }

        let mut has_debit = false;
        let mut has_credit = false;

        for (index, line) in self.lines.iter().enumerate() {
            if line.company_id != self.company_id
                || line.entry_date != self.entry_date
                || line.entry_id != self.id
            {
                return Err(JournalError::HeaderMismatch(index));
            }
            if line.debit.is_negative() || line.credit.is_negative() {
                return Err(JournalError::NegativeAmount(index));
            }
            match (line.debit.is_positive(), line.credit.is_positive()) {
                (true, true) => return Err(JournalError::BothSides(index)),
                (false, false) => return Err(JournalError::ZeroAmount(index)),
                (true, false) => has_debit = true,
                (false, true) => has_credit = true,
            }
        }

        if !has_debit || !has_credit {
            return Err(JournalError::SingleSided);
        }

        let debits = self.total_debit().ok_or(JournalError::Overflow)?;
        let credits = self.total_credit().ok_or(JournalError::Overflow)?;
        if debits != credits {
            return Err(JournalError::Unbalanced { debits, credits });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn entry() -> JournalEntry {
        JournalEntry::new(CompanyId::new(), date(), "JV-001", "Test")
    }

    #[test]
    fn test_balanced_entry() {
        let e = entry()
            .debit(AccountId::new(), Fils::new(10_500))
            .credit(AccountId::new(), Fils::new(10_000))
            .credit(AccountId::new(), Fils::new(500));
        assert_eq!(e.validate(), Ok(()));
        assert_eq!(e.total_debit(), e.total_credit());
        assert_eq!(e.total_debit(), Some(Fils::new(10_500)));
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        // Wrapping would make these debits sum to 1 and match the credit.
        let e = entry()
            .debit(AccountId::new(), Fils::new(i64::MAX))
            .debit(AccountId::new(), Fils::new(i64::MAX))
            .debit(AccountId::new(), Fils::new(3))
            .credit(AccountId::new(), Fils::new(1));
        assert_eq!(e.total_debit(), None);
        assert_eq!(e.validate(), Err(JournalError::Overflow));
    }

    #[test]
    fn test_lines_inherit_header() {
        let e = entry().debit(AccountId::new(), Fils::new(1));
        assert_eq!(e.lines[0].entry_id, e.id);
        assert_eq!(e.lines[0].company_id, e.company_id);
        assert_eq!(e.lines[0].entry_date, date());
    }

    #[test]
    fn test_unbalanced_entry() {
        let e = entry()
            .debit(AccountId::new(), Fils::new(100))
            .credit(AccountId::new(), Fils::new(90));
        assert_eq!(
            e.validate(),
            Err(JournalError::Unbalanced {
                debits: Fils::new(100),
                credits: Fils::new(90),
            })
        );
    }

    #[test]
    fn test_empty_entry() {
        assert_eq!(entry().validate(), Err(JournalError::NoLines));
    }

    #[test]
    fn test_single_sided_entry() {
        let e = entry()
            .debit(AccountId::new(), Fils::new(100))
            .debit(AccountId::new(), Fils::new(100));
        assert_eq!(e.validate(), Err(JournalError::SingleSided));
    }

    #[test]
    fn test_zero_and_negative_lines() {
        let zero = entry().debit(AccountId::new(), Fils::ZERO);
        assert_eq!(zero.validate(), Err(JournalError::ZeroAmount(0)));

        let negative = entry()
            .debit(AccountId::new(), Fils::new(100))
            .credit(AccountId::new(), Fils::new(-100));
        assert_eq!(negative.validate(), Err(JournalError::NegativeAmount(1)));
    }

    #[test]
    fn test_both_sides_on_one_line() {
        let mut e = entry()
            .debit(AccountId::new(), Fils::new(100))
            .credit(AccountId::new(), Fils::new(100));
        e.lines[0].credit = Fils::new(5);
        assert_eq!(e.validate(), Err(JournalError::BothSides(0)));
    }

    #[test]
    fn test_header_mismatch() {
        let mut e = entry()
            .debit(AccountId::new(), Fils::new(100))
            .credit(AccountId::new(), Fils::new(100));
        e.lines[1].entry_date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(e.validate(), Err(JournalError::HeaderMismatch(1)));
    }
}
