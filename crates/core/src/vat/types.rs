//! VAT data types.

use chrono::{DateTime, NaiveDate, Utc};
use daftar_shared::Fils;
use daftar_shared::types::{CompanyId, DocumentId, VatReturnId};
use serde::{Deserialize, Serialize};

use super::rate::VatRate;
use crate::period::DateRange;

/// Days after the end of a tax period by which the return must be filed.
pub const FILING_WINDOW_DAYS: u64 = 28;

/// Which side of the VAT account a line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatDirection {
    /// Sales: VAT charged to customers.
    Output,
    /// Purchases: VAT paid to suppliers.
    Input,
}

/// A single invoice or bill line as seen by the VAT engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatLine {
    /// Source invoice or bill.
    pub document_id: DocumentId,
    /// Sales (output) or purchases (input).
    pub direction: VatDirection,
    /// Transaction date of the document.
    pub date: NaiveDate,
    /// Net (VAT-exclusive) amount.
    pub net_amount: Fils,
    /// Rate classification.
    pub rate: VatRate,
}

impl VatLine {
    /// VAT due on this line.
    #[must_use]
    pub fn vat(&self) -> Fils {
        self.rate.vat_on(self.net_amount)
    }
}

/// VAT position for a tax period.
///
/// The supply and expense breakdowns mirror the boxes of the FTA VAT201
/// return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSummary {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// VAT charged on sales.
    pub output_vat: Fils,
    /// VAT paid on purchases.
    pub input_vat: Fils,
    /// `output_vat - input_vat`; negative means a refund is due.
    pub net_payable: Fils,
    /// Net value of standard-rated supplies.
    pub standard_rated_supplies: Fils,
    /// Net value of zero-rated supplies.
    pub zero_rated_supplies: Fils,
    /// Net value of exempt supplies.
    pub exempt_supplies: Fils,
    /// Standard-rated plus zero-rated supplies; the figure tested against
    /// the registration threshold.
    pub taxable_supplies: Fils,
    /// Net value of standard-rated expenses.
    pub standard_rated_expenses: Fils,
    /// Net value of zero-rated expenses.
    pub zero_rated_expenses: Fils,
    /// Net value of exempt expenses.
    pub exempt_expenses: Fils,
    /// Number of lines aggregated.
    pub line_count: usize,
    /// Return filing deadline.
    pub filing_due_date: NaiveDate,
}

impl VatSummary {
    /// A zeroed summary for `range`.
    #[must_use]
    pub fn empty(range: DateRange) -> Self {
        Self {
            period_start: range.start(),
            period_end: range.end(),
            output_vat: Fils::ZERO,
            input_vat: Fils::ZERO,
            net_payable: Fils::ZERO,
            standard_rated_supplies: Fils::ZERO,
            zero_rated_supplies: Fils::ZERO,
            exempt_supplies: Fils::ZERO,
            taxable_supplies: Fils::ZERO,
            standard_rated_expenses: Fils::ZERO,
            zero_rated_expenses: Fils::ZERO,
            exempt_expenses: Fils::ZERO,
            line_count: 0,
            filing_due_date: range.days_after_end(FILING_WINDOW_DAYS),
        }
    }

    /// Returns true if the FTA owes the company money.
    #[must_use]
    pub fn is_refund(&self) -> bool {
        self.net_payable.is_negative()
    }
}

/// Lifecycle of a VAT return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatReturnStatus {
    /// Prepared but not submitted.
    Draft,
    /// Submitted to the FTA.
    Filed,
}

impl VatReturnStatus {
    /// Returns the storage/wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Filed => "filed",
        }
    }
}

/// A VAT return record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatReturn {
    /// Return ID.
    pub id: VatReturnId,
    /// Filing company.
    pub company_id: CompanyId,
    /// First day of the tax period.
    pub period_start: NaiveDate,
    /// Last day of the tax period.
    pub period_end: NaiveDate,
    /// Output VAT declared.
    pub output_vat: Fils,
    /// Input VAT reclaimed.
    pub input_vat: Fils,
    /// Net payable (negative for refunds).
    pub net_payable: Fils,
    /// Draft or filed.
    pub status: VatReturnStatus,
    /// Submission timestamp, for filed returns.
    pub filed_at: Option<DateTime<Utc>>,
    /// FTA acknowledgement reference.
    pub reference: Option<String>,
}

impl VatReturn {
    /// Prepares a draft return from a computed summary.
    #[must_use]
    pub fn draft(company_id: CompanyId, summary: &VatSummary) -> Self {
        Self {
            id: VatReturnId::new(),
            company_id,
            period_start: summary.period_start,
            period_end: summary.period_end,
            output_vat: summary.output_vat,
            input_vat: summary.input_vat,
            net_payable: summary.net_payable,
            status: VatReturnStatus::Draft,
            filed_at: None,
            reference: None,
        }
    }

    /// Marks the return as filed.
    #[must_use]
    pub fn filed(mut self, filed_at: DateTime<Utc>, reference: impl Into<String>) -> Self {
        self.status = VatReturnStatus::Filed;
        self.filed_at = Some(filed_at);
        self.reference = Some(reference.into());
        self
    }
}
