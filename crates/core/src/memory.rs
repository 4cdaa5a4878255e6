//! In-memory ledger store.
//!
//! Backs demo mode and tests. Writes go through the same validation as the
//! database path: entries must balance and reference known accounts.

use std::collections::HashMap;

use daftar_shared::types::{AccountId, CompanyId};
use thiserror::Error;

use crate::accounts::{Account, codes, find_by_code};
use crate::company::Company;
use crate::documents::{DocumentError, DocumentKind, TaxDocument};
use crate::journal::{JournalEntry, JournalError, JournalLine};
use crate::period::{DateRange, Period};
use crate::source::{LedgerReader, SourceError};
use crate::vat::{VatLine, VatReturn};

/// Errors raised while writing to an [`InMemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerWriteError {
    /// Company has not been added.
    #[error("Unknown company: {0}")]
    UnknownCompany(CompanyId),

    /// Company was already added.
    #[error("Company already exists: {0}")]
    DuplicateCompany(CompanyId),

    /// Entry references an account outside the company's chart.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),

    /// A control account required for posting is missing from the chart.
    #[error("Chart of accounts has no account with code {0}")]
    MissingControlAccount(&'static str),

    /// Entry failed double-entry validation.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Document cannot be turned into a journal entry.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Dates in the requested year cannot be represented.
    #[error("Year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

#[derive(Debug)]
struct CompanyBooks {
    company: Company,
    accounts: Vec<Account>,
    lines: Vec<JournalLine>,
    documents: Vec<TaxDocument>,
    returns: Vec<VatReturn>,
}

/// A ledger held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: HashMap<CompanyId, CompanyBooks>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a company with its chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerWriteError::DuplicateCompany`] if the id is taken.
    pub fn add_company(
        &mut self,
        company: Company,
        accounts: Vec<Account>,
    ) -> Result<(), LedgerWriteError> {
        if self.books.contains_key(&company.id) {
            return Err(LedgerWriteError::DuplicateCompany(company.id));
        }
        self.books.insert(
            company.id,
            CompanyBooks {
                company,
                accounts,
                lines: Vec::new(),
                documents: Vec::new(),
                returns: Vec::new(),
            },
        );
        Ok(())
    }

    /// Validates and posts a journal entry.
    ///
    /// # Errors
    ///
    /// Fails if the company is unknown, the entry does not balance, or a line
    /// references an account outside the company's chart.
    pub fn post_entry(&mut self, entry: JournalEntry) -> Result<(), LedgerWriteError> {
        let books = self.books_mut(entry.company_id)?;
        entry.validate()?;

        if let Some(line) = entry
            .lines
            .iter()
            .find(|l| !books.accounts.iter().any(|a| a.id == l.account_id))
        {
            return Err(LedgerWriteError::UnknownAccount(line.account_id));
        }

        books.lines.extend(entry.lines);
        Ok(())
    }

    /// Records an invoice or bill.
    ///
    /// Documents whose status counts for VAT also post their journal entry
    /// against receivables/output VAT or payables/input VAT.
    ///
    /// # Errors
    ///
    /// Fails if the company is unknown, a control account is missing, or the
    /// generated entry is rejected by [`Self::post_entry`].
    pub fn record_document(&mut self, document: TaxDocument) -> Result<(), LedgerWriteError> {
        let books = self.books_mut(document.company_id)?;
        if let Some(entry) = document_entry(&books.accounts, &document)? {
            self.post_entry(entry)?;
        }
        self.books_mut(document.company_id)?.documents.push(document);
        Ok(())
    }

    /// Records a VAT return.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerWriteError::UnknownCompany`] for an unknown company.
    pub fn record_vat_return(&mut self, vat_return: VatReturn) -> Result<(), LedgerWriteError> {
        self.books_mut(vat_return.company_id)?.returns.push(vat_return);
        Ok(())
    }

    /// Companies held by this ledger, in no particular order.
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.books.values().map(|b| &b.company)
    }

    fn books_mut(&mut self, company_id: CompanyId) -> Result<&mut CompanyBooks, LedgerWriteError> {
        self.books
            .get_mut(&company_id)
            .ok_or(LedgerWriteError::UnknownCompany(company_id))
    }
}

/// Builds the journal entry that books `document`, if its status posts.
///
/// Invoices post against receivables and output VAT, bills against
/// payables and input VAT, looked up by code in `accounts`.
///
/// # Errors
///
/// Returns [`LedgerWriteError::MissingControlAccount`] when the chart lacks
/// a control account, or [`LedgerWriteError::Document`] when the document
/// has a negative line or overflowing totals.
pub fn document_entry(
    accounts: &[Account],
    document: &TaxDocument,
) -> Result<Option<JournalEntry>, LedgerWriteError> {
    if !document.status.counts_for_vat() {
        return Ok(None);
    }
    let (control_code, vat_code) = match document.kind {
        DocumentKind::SalesInvoice => (codes::ACCOUNTS_RECEIVABLE, codes::VAT_PAYABLE),
        DocumentKind::VendorBill => (codes::ACCOUNTS_PAYABLE, codes::VAT_RECOVERABLE),
    };
    let lookup = |code: &'static str| {
        find_by_code(accounts, code)
            .map(|a| a.id)
            .ok_or(LedgerWriteError::MissingControlAccount(code))
    };
    let entry = document.journal_entry(lookup(control_code)?, lookup(vat_code)?)?;
    Ok(Some(entry))
}

#[async_trait::async_trait]
impl LedgerReader for InMemoryLedger {
    async fn find_company(&self, company_id: CompanyId) -> Result<Option<Company>, SourceError> {
        Ok(self.books.get(&company_id).map(|b| b.company.clone()))
    }

    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, SourceError> {
        Ok(self
            .books
            .get(&company_id)
            .map(|b| b.accounts.clone())
            .unwrap_or_default())
    }

    async fn journal_lines(
        &self,
        company_id: CompanyId,
        period: Period,
    ) -> Result<Vec<JournalLine>, SourceError> {
        Ok(self
            .books
            .get(&company_id)
            .map(|b| {
                b.lines
                    .iter()
                    .filter(|l| period.contains(l.entry_date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn vat_lines(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<Vec<VatLine>, SourceError> {
        Ok(self
            .books
            .get(&company_id)
            .map(|b| {
                b.documents
                    .iter()
                    .flat_map(TaxDocument::vat_lines)
                    .filter(|l| range.contains(l.date))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn vat_returns(&self, company_id: CompanyId) -> Result<Vec<VatReturn>, SourceError> {
        let mut returns = self
            .books
            .get(&company_id)
            .map(|b| b.returns.clone())
            .unwrap_or_default();
        returns.sort_by(|a, b| b.period_start.cmp(&a.period_start));
        Ok(returns)
    }
}
