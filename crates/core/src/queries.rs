//! Report query facade.
//!
//! Accepts the raw identifiers and dates a caller supplies, validates them,
//! resolves the company, reads the ledger and hands the rows to the pure
//! builders. Nothing here mutates state.

use std::sync::Arc;

use daftar_shared::types::CompanyId;
use tracing::{debug, warn};

use crate::accounts::Account;
use crate::company::Company;
use crate::journal::JournalLine;
use crate::period::{DateRange, Period, parse_iso_date};
use crate::reports::{
    BalanceSheetReport, ProfitAndLossReport, ReportError, ReportService, ReportStatus,
    TrialBalanceReport,
};
use crate::source::LedgerReader;
use crate::vat::{VatReturn, VatService, VatSummary};

/// Entry point for every report and VAT query.
#[derive(Clone)]
pub struct ReportQueries {
    reader: Arc<dyn LedgerReader>,
}

impl ReportQueries {
    /// Creates a facade over `reader`.
    #[must_use]
    pub fn new(reader: Arc<dyn LedgerReader>) -> Self {
        Self { reader }
    }

    /// Trial balance of `company_id` as of `as_of` (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// `InvalidDate` for a malformed date (checked before any read),
    /// `CompanyNotFound` for an unknown company, or a source error.
    pub async fn get_trial_balance(
        &self,
        company_id: &str,
        as_of: &str,
    ) -> Result<TrialBalanceReport, ReportError> {
        let as_of = parse_iso_date("as_of", as_of)?;
        let company = self.resolve_company(company_id).await?;
        let (accounts, lines) = tokio::try_join!(
            self.reader.accounts(company.id),
            self.reader.journal_lines(company.id, Period::as_of(as_of)),
        )?;
        ensure_known_accounts(&accounts, &lines)?;

        let report = ReportService::generate_trial_balance(as_of, &accounts, &lines)?;
        if report.status == ReportStatus::Imbalanced {
            warn!(
                company_id = %company.id,
                %as_of,
                total_debit = %report.total_debit,
                total_credit = %report.total_credit,
                "Trial balance does not balance"
            );
        }
        debug!(
            company_id = %company.id,
            %as_of,
            items = report.items.len(),
            "Trial balance generated"
        );
        Ok(report)
    }

    /// Balance sheet of `company_id` as of `as_of` (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_trial_balance`].
    pub async fn get_balance_sheet(
        &self,
        company_id: &str,
        as_of: &str,
    ) -> Result<BalanceSheetReport, ReportError> {
        let as_of = parse_iso_date("as_of", as_of)?;
        let company = self.resolve_company(company_id).await?;
        let (accounts, lines) = tokio::try_join!(
            self.reader.accounts(company.id),
            self.reader.journal_lines(company.id, Period::as_of(as_of)),
        )?;
        ensure_known_accounts(&accounts, &lines)?;

        let report = ReportService::generate_balance_sheet(as_of, &accounts, &lines)?;
        if report.status == ReportStatus::Imbalanced {
            warn!(
                company_id = %company.id,
                %as_of,
                assets = %report.assets.total,
                liabilities_and_equity = %report.total_liabilities_and_equity,
                "Balance sheet does not balance"
            );
        }
        debug!(company_id = %company.id, %as_of, "Balance sheet generated");
        Ok(report)
    }

    /// Profit and loss of `company_id` for activity between `start_date`
    /// and `end_date` inclusive.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for a malformed date, `InvalidDateRange` when the start
    /// follows the end, `CompanyNotFound`, or a source error.
    pub async fn get_profit_and_loss(
        &self,
        company_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ProfitAndLossReport, ReportError> {
        let range = DateRange::parse("start_date", start_date, "end_date", end_date)?;
        let company = self.resolve_company(company_id).await?;
        let (accounts, lines) = tokio::try_join!(
            self.reader.accounts(company.id),
            self.reader.journal_lines(company.id, Period::range(range)),
        )?;
        ensure_known_accounts(&accounts, &lines)?;

        let report = ReportService::generate_profit_and_loss(range, &accounts, &lines)?;
        debug!(
            company_id = %company.id,
            start = %range.start(),
            end = %range.end(),
            net_profit = %report.net_profit,
            "Profit and loss generated"
        );
        Ok(report)
    }

    /// VAT position of `company_id` for the inclusive tax period.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_profit_and_loss`].
    pub async fn calculate_vat_summary(
        &self,
        company_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<VatSummary, ReportError> {
        let range = DateRange::parse("period_start", period_start, "period_end", period_end)?;
        let company = self.resolve_company(company_id).await?;
        let lines = self.reader.vat_lines(company.id, range).await?;

        let summary = VatService::summarize(range, &lines)?;
        debug!(
            company_id = %company.id,
            lines = summary.line_count,
            net_payable = %summary.net_payable,
            "VAT summary calculated"
        );
        Ok(summary)
    }

    /// Previously recorded VAT returns of `company_id`, newest first.
    ///
    /// # Errors
    ///
    /// `CompanyNotFound` or a source error.
    pub async fn get_vat_returns(&self, company_id: &str) -> Result<Vec<VatReturn>, ReportError> {
        let company = self.resolve_company(company_id).await?;
        Ok(self.reader.vat_returns(company.id).await?)
    }

    /// Looks up a company by its raw id.
    ///
    /// # Errors
    ///
    /// `CompanyNotFound` when the id is malformed or unknown.
    pub async fn resolve_company(&self, company_id: &str) -> Result<Company, ReportError> {
        let not_found = || ReportError::CompanyNotFound(company_id.to_string());
        let id: CompanyId = company_id.parse().map_err(|_| not_found())?;
        self.reader.find_company(id).await?.ok_or_else(not_found)
    }
}

/// Rejects lines that point at accounts missing from the chart.
fn ensure_known_accounts(
    accounts: &[Account],
    lines: &[JournalLine],
) -> Result<(), ReportError> {
    match ReportService::unknown_accounts(accounts, lines).first() {
        Some(id) => Err(ReportError::InvalidData(format!(
            "journal line references unknown account {id}"
        ))),
        None => Ok(()),
    }
}
