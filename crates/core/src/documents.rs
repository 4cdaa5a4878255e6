//! Sales invoices and vendor bills.
//!
//! Documents are the source of VAT lines and post a balanced journal entry
//! when issued.

use chrono::NaiveDate;
use daftar_shared::Fils;
use daftar_shared::types::{AccountId, CompanyId, DocumentId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::journal::JournalEntry;
use crate::vat::{VatDirection, VatLine, VatRate};

/// Errors raised while booking a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A line has a negative net amount.
    #[error("Document line {0} has a negative net amount")]
    NegativeLine(usize),

    /// Net, VAT, or gross total does not fit in an `i64` of fils.
    #[error("Document totals overflow")]
    Overflow,
}

/// Invoice (sale) or bill (purchase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Sales invoice issued to a customer.
    SalesInvoice,
    /// Bill received from a supplier.
    VendorBill,
}

impl DocumentKind {
    /// VAT direction of the document's lines.
    #[must_use]
    pub const fn vat_direction(self) -> VatDirection {
        match self {
            Self::SalesInvoice => VatDirection::Output,
            Self::VendorBill => VatDirection::Input,
        }
    }
}

/// Document lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being prepared; not yet a tax event.
    Draft,
    /// Issued (invoice) or received (bill).
    Issued,
    /// Settled.
    Paid,
    /// Cancelled.
    Void,
}

impl DocumentStatus {
    /// Returns true if documents in this status count for VAT.
    #[must_use]
    pub const fn counts_for_vat(self) -> bool {
        matches!(self, Self::Issued | Self::Paid)
    }

    /// Returns the storage/wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Void => "void",
        }
    }
}

/// One priced line on an invoice or bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Line description.
    pub description: String,
    /// Revenue account (invoices) or expense/asset account (bills).
    pub account_id: AccountId,
    /// Net (VAT-exclusive) amount.
    pub net_amount: Fils,
    /// VAT treatment.
    pub rate: VatRate,
}

/// A sales invoice or vendor bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDocument {
    /// Document ID.
    pub id: DocumentId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Invoice or bill.
    pub kind: DocumentKind,
    /// Document number (e.g. "INV-0001").
    pub number: String,
    /// Customer or supplier name.
    pub counterparty: String,
    /// Tax point date.
    pub issue_date: NaiveDate,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Priced lines.
    pub lines: Vec<DocumentLine>,
}

impl TaxDocument {
    /// Sum of net line amounts, or `None` on overflow.
    #[must_use]
    pub fn net_total(&self) -> Option<Fils> {
        Fils::checked_sum(self.lines.iter().map(|l| l.net_amount))
    }

    /// Sum of VAT across lines, or `None` on overflow.
    #[must_use]
    pub fn vat_total(&self) -> Option<Fils> {
        Fils::checked_sum(self.lines.iter().map(|l| l.rate.vat_on(l.net_amount)))
    }

    /// Net plus VAT, or `None` on overflow.
    #[must_use]
    pub fn gross_total(&self) -> Option<Fils> {
        self.net_total()?.checked_add(self.vat_total()?)
    }

    /// Lines as seen by the VAT engine. Empty unless the status counts.
    #[must_use]
    pub fn vat_lines(&self) -> Vec<VatLine> {
        if !self.status.counts_for_vat() {
            return Vec::new();
        }
        self.lines
            .iter()
            .map(|l| VatLine {
                document_id: self.id,
                direction: self.kind.vat_direction(),
                date: self.issue_date,
                net_amount: l.net_amount,
                rate: l.rate,
            })
            .collect()
    }

    /// Builds the journal entry that books this document.
    ///
    /// Invoices debit `control_account` (receivables) for the gross amount
    /// and credit each line's revenue account plus `vat_account` (output
    /// VAT). Bills mirror this against payables and input VAT.
    ///
    /// Zero-value lines post nothing; they add nothing to the gross amount
    /// either, so the entry still balances.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NegativeLine`] for a line with a negative
    /// net amount and [`DocumentError::Overflow`] when a total overflows.
    pub fn journal_entry(
        &self,
        control_account: AccountId,
        vat_account: AccountId,
    ) -> Result<JournalEntry, DocumentError> {
        if let Some(index) = self.lines.iter().position(|l| l.net_amount.is_negative()) {
            return Err(DocumentError::NegativeLine(index));
        }
        let vat = self.vat_total().ok_or(DocumentError::Overflow)?;
        let gross = self.gross_total().ok_or(DocumentError::Overflow)?;
        let posted = self.lines.iter().filter(|l| l.net_amount.is_positive());

        let description = format!("{} - {}", self.number, self.counterparty);
        let mut entry =
            JournalEntry::new(self.company_id, self.issue_date, &self.number, description);

        match self.kind {
            DocumentKind::SalesInvoice => {
                entry = entry.debit(control_account, gross);
                for line in posted {
                    entry = entry.credit(line.account_id, line.net_amount);
                }
                if vat.is_positive() {
                    entry = entry.credit(vat_account, vat);
                }
            }
            DocumentKind::VendorBill => {
                for line in posted {
                    entry = entry.debit(line.account_id, line.net_amount);
                }
                if vat.is_positive() {
                    entry = entry.debit(vat_account, vat);
                }
                entry = entry.credit(control_account, gross);
            }
        }

        Ok(entry)
    }
}
