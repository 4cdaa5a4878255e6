//! Financial report routes.
//!
//! Trial balance, balance sheet and profit and loss for one company. Dates
//! are passed through as raw strings so the query facade owns validation.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::NaiveDate;
use daftar_core::period::{DateRange, parse_iso_date, today_in_uae};
use daftar_core::reports::{
    BalanceSheetReport, ProfitAndLossReport, ReportLine, ReportStatus, TrialBalanceItem,
    TrialBalanceReport,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::format_money;
use crate::AppState;
use crate::error::ApiError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/reports/trial-balance",
            get(get_trial_balance),
        )
        .route(
            "/companies/{company_id}/reports/balance-sheet",
            get(get_balance_sheet),
        )
        .route(
            "/companies/{company_id}/reports/profit-and-loss",
            get(get_profit_and_loss),
        )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for point-in-time reports.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Report date (`YYYY-MM-DD`). Defaults to today in the UAE.
    pub as_of: Option<String>,
}

/// Query parameters for the profit and loss statement.
#[derive(Debug, Deserialize)]
pub struct ProfitAndLossQuery {
    /// Period start. Defaults to January 1 of the current year.
    pub start_date: Option<String>,
    /// Period end. Defaults to today in the UAE.
    pub end_date: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for trial balance.
#[derive(Debug, Serialize)]
pub struct TrialBalanceResponse {
    /// Company the report was requested for.
    pub company_id: String,
    /// As-of date.
    pub as_of: String,
    /// Currency.
    pub currency: String,
    /// Accounts with a non-zero net balance.
    pub items: Vec<TrialBalanceItemResponse>,
    /// Total debits.
    pub total_debit: String,
    /// Total credits.
    pub total_credit: String,
    /// Whether debits equal credits.
    pub is_balanced: bool,
    /// Data presence and balance check.
    pub status: ReportStatus,
}

/// Trial balance row response.
#[derive(Debug, Serialize)]
pub struct TrialBalanceItemResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: &'static str,
    /// Normal balance side.
    pub normal_balance: &'static str,
    /// Debit column.
    pub debit: String,
    /// Credit column.
    pub credit: String,
    /// Balance on the account's normal side.
    pub balance: String,
}

/// A labelled amount on a statement.
#[derive(Debug, Serialize)]
pub struct ReportLineResponse {
    /// Account ID; absent for computed lines.
    pub account_id: Option<Uuid>,
    /// Account code.
    pub code: String,
    /// Line label.
    pub name: String,
    /// Amount.
    pub amount: String,
}

/// Response for balance sheet.
#[derive(Debug, Serialize)]
pub struct BalanceSheetResponse {
    /// Company the report was requested for.
    pub company_id: String,
    /// As-of date.
    pub as_of: String,
    /// Currency.
    pub currency: String,
    /// Assets.
    pub assets: AssetSectionResponse,
    /// Liabilities.
    pub liabilities: LiabilitySectionResponse,
    /// Equity, including current period earnings.
    pub equity: EquitySectionResponse,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: String,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
    /// Data presence and balance check.
    pub status: ReportStatus,
}

/// Asset section response.
#[derive(Debug, Serialize)]
pub struct AssetSectionResponse {
    /// Current assets.
    pub current: Vec<ReportLineResponse>,
    /// Current assets total.
    pub current_total: String,
    /// Fixed assets.
    pub fixed: Vec<ReportLineResponse>,
    /// Fixed assets total.
    pub fixed_total: String,
    /// Current then fixed assets.
    pub all: Vec<ReportLineResponse>,
    /// Total assets.
    pub total: String,
}

/// Liability section response.
#[derive(Debug, Serialize)]
pub struct LiabilitySectionResponse {
    /// Current liabilities.
    pub current: Vec<ReportLineResponse>,
    /// Current liabilities total.
    pub current_total: String,
    /// Long-term liabilities.
    pub long_term: Vec<ReportLineResponse>,
    /// Long-term liabilities total.
    pub long_term_total: String,
    /// Current then long-term liabilities.
    pub all: Vec<ReportLineResponse>,
    /// Total liabilities.
    pub total: String,
}

/// Equity section response.
#[derive(Debug, Serialize)]
pub struct EquitySectionResponse {
    /// Equity accounts followed by current period earnings.
    pub all: Vec<ReportLineResponse>,
    /// Total equity.
    pub total: String,
}

/// A flat statement section.
#[derive(Debug, Serialize)]
pub struct StatementSectionResponse {
    /// Section lines.
    pub accounts: Vec<ReportLineResponse>,
    /// Section total.
    pub total: String,
}

/// Response for profit and loss.
#[derive(Debug, Serialize)]
pub struct ProfitAndLossResponse {
    /// Company the report was requested for.
    pub company_id: String,
    /// Period start.
    pub start_date: String,
    /// Period end.
    pub end_date: String,
    /// Currency.
    pub currency: String,
    /// Revenue section.
    pub revenue: StatementSectionResponse,
    /// Cost of goods sold section.
    pub cost_of_goods_sold: StatementSectionResponse,
    /// Gross profit.
    pub gross_profit: String,
    /// Operating expenses section.
    pub operating_expenses: StatementSectionResponse,
    /// Other income section.
    pub other_income: StatementSectionResponse,
    /// Net profit.
    pub net_profit: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_trial_balance(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<TrialBalanceResponse>, ApiError> {
    let as_of = query.as_of.unwrap_or_else(|| today_in_uae().to_string());

    let report = state
        .queries
        .get_trial_balance(&company_id, &as_of)
        .await
        .map_err(|e| {
            ApiError::from_report(e, || {
                let empty = TrialBalanceReport::empty(fallback_date("as_of", &as_of));
                trial_balance_to_response(&company_id, &state.currency, &empty)
            })
        })?;

    Ok(Json(trial_balance_to_response(
        &company_id,
        &state.currency,
        &report,
    )))
}

async fn get_balance_sheet(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BalanceSheetResponse>, ApiError> {
    let as_of = query.as_of.unwrap_or_else(|| today_in_uae().to_string());

    let report = state
        .queries
        .get_balance_sheet(&company_id, &as_of)
        .await
        .map_err(|e| {
            ApiError::from_report(e, || {
                let empty = BalanceSheetReport::empty(fallback_date("as_of", &as_of));
                balance_sheet_to_response(&company_id, &state.currency, &empty)
            })
        })?;

    Ok(Json(balance_sheet_to_response(
        &company_id,
        &state.currency,
        &report,
    )))
}

async fn get_profit_and_loss(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<ProfitAndLossQuery>,
) -> Result<Json<ProfitAndLossResponse>, ApiError> {
    let ytd = DateRange::year_to_date(today_in_uae());
    let start_date = query.start_date.unwrap_or_else(|| ytd.start().to_string());
    let end_date = query.end_date.unwrap_or_else(|| ytd.end().to_string());

    let report = state
        .queries
        .get_profit_and_loss(&company_id, &start_date, &end_date)
        .await
        .map_err(|e| {
            ApiError::from_report(e, || {
                let range = DateRange::new(
                    fallback_date("start_date", &start_date),
                    fallback_date("end_date", &end_date),
                )
                .unwrap_or(ytd);
                let empty = ProfitAndLossReport::empty(range);
                profit_and_loss_to_response(&company_id, &state.currency, &empty)
            })
        })?;

    Ok(Json(profit_and_loss_to_response(
        &company_id,
        &state.currency,
        &report,
    )))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Date to stamp on a zeroed report. Not-found errors are only raised after
/// the dates parsed, so the fallback to today is never visible in practice.
pub(crate) fn fallback_date(field: &'static str, value: &str) -> NaiveDate {
    parse_iso_date(field, value).unwrap_or_else(|_| today_in_uae())
}

/// Converts a statement line to response.
pub(crate) fn report_line_to_response(line: &ReportLine) -> ReportLineResponse {
    ReportLineResponse {
        account_id: line.account_id.map(|id| id.into_inner()),
        code: line.code.clone(),
        name: line.name.clone(),
        amount: format_money(line.amount),
    }
}

fn lines_to_response(lines: &[ReportLine]) -> Vec<ReportLineResponse> {
    lines.iter().map(report_line_to_response).collect()
}

fn trial_balance_item_to_response(item: &TrialBalanceItem) -> TrialBalanceItemResponse {
    TrialBalanceItemResponse {
        account_id: item.account_id.into_inner(),
        code: item.code.clone(),
        name: item.name.clone(),
        account_type: item.account_type.as_str(),
        normal_balance: item.normal_balance.as_str(),
        debit: format_money(item.debit),
        credit: format_money(item.credit),
        balance: format_money(item.balance),
    }
}

fn trial_balance_to_response(
    company_id: &str,
    currency: &str,
    report: &TrialBalanceReport,
) -> TrialBalanceResponse {
    TrialBalanceResponse {
        company_id: company_id.to_string(),
        as_of: report.as_of.to_string(),
        currency: currency.to_string(),
        items: report
            .items
            .iter()
            .map(trial_balance_item_to_response)
            .collect(),
        total_debit: format_money(report.total_debit),
        total_credit: format_money(report.total_credit),
        is_balanced: report.is_balanced,
        status: report.status,
    }
}

fn balance_sheet_to_response(
    company_id: &str,
    currency: &str,
    report: &BalanceSheetReport,
) -> BalanceSheetResponse {
    BalanceSheetResponse {
        company_id: company_id.to_string(),
        as_of: report.as_of.to_string(),
        currency: currency.to_string(),
        assets: AssetSectionResponse {
            current: lines_to_response(&report.assets.current),
            current_total: format_money(report.assets.current_total),
            fixed: lines_to_response(&report.assets.fixed),
            fixed_total: format_money(report.assets.fixed_total),
            all: lines_to_response(&report.assets.all),
            total: format_money(report.assets.total),
        },
        liabilities: LiabilitySectionResponse {
            current: lines_to_response(&report.liabilities.current),
            current_total: format_money(report.liabilities.current_total),
            long_term: lines_to_response(&report.liabilities.long_term),
            long_term_total: format_money(report.liabilities.long_term_total),
            all: lines_to_response(&report.liabilities.all),
            total: format_money(report.liabilities.total),
        },
        equity: EquitySectionResponse {
            all: lines_to_response(&report.equity.all),
            total: format_money(report.equity.total),
        },
        total_liabilities_and_equity: format_money(report.total_liabilities_and_equity),
        is_balanced: report.is_balanced,
        status: report.status,
    }
}

fn profit_and_loss_to_response(
    company_id: &str,
    currency: &str,
    report: &ProfitAndLossReport,
) -> ProfitAndLossResponse {
    let section = |lines: &[ReportLine], total| StatementSectionResponse {
        accounts: lines_to_response(lines),
        total: format_money(total),
    };

    ProfitAndLossResponse {
        company_id: company_id.to_string(),
        start_date: report.start_date.to_string(),
        end_date: report.end_date.to_string(),
        currency: currency.to_string(),
        revenue: section(&report.revenue, report.total_revenue),
        cost_of_goods_sold: section(&report.cogs, report.total_cogs),
        gross_profit: format_money(report.gross_profit),
        operating_expenses: section(&report.expenses, report.total_expenses),
        other_income: section(&report.other_income, report.total_other_income),
        net_profit: format_money(report.net_profit),
    }
}
