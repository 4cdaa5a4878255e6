//! Read access to a company's ledger.
//!
//! [`LedgerReader`] is the seam between the report facade and storage.
//! PostgreSQL and in-memory implementations live in other modules and crates.

use daftar_shared::types::CompanyId;
use thiserror::Error;

use crate::accounts::Account;
use crate::company::Company;
use crate::journal::JournalLine;
use crate::period::{DateRange, Period};
use crate::vat::{VatLine, VatReturn};

/// Errors raised by a ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The store could not be reached or the query failed.
    #[error("Ledger store unreachable: {0}")]
    Unreachable(String),

    /// The store returned rows that violate the domain model.
    #[error("Invalid ledger data: {0}")]
    InvalidData(String),
}

/// Read-only view of company ledgers.
#[async_trait::async_trait]
pub trait LedgerReader: Send + Sync {
    /// Looks up a company. `Ok(None)` when it does not exist.
    async fn find_company(&self, company_id: CompanyId) -> Result<Option<Company>, SourceError>;

    /// The company's chart of accounts.
    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, SourceError>;

    /// Journal lines dated inside `period`.
    ///
    /// For an as-of period this is every line up to and including the date.
    async fn journal_lines(
        &self,
        company_id: CompanyId,
        period: Period,
    ) -> Result<Vec<JournalLine>, SourceError>;

    /// VAT lines of issued or paid invoices and bills dated inside `range`.
    async fn vat_lines(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<Vec<VatLine>, SourceError>;

    /// Previously recorded VAT returns, newest period first.
    async fn vat_returns(&self, company_id: CompanyId) -> Result<Vec<VatReturn>, SourceError>;
}
