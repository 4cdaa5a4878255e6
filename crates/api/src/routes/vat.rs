//! VAT routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use daftar_core::period::{DateRange, today_in_uae};
use daftar_core::vat::{VatReturn, VatSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::format_money;
use super::reports::fallback_date;
use crate::AppState;
use crate::error::ApiError;

/// Creates the VAT routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/vat/summary", get(get_vat_summary))
        .route("/companies/{company_id}/vat/returns", get(list_vat_returns))
}

/// Query parameters for the VAT summary.
#[derive(Debug, Deserialize)]
pub struct VatSummaryQuery {
    /// First day of the tax period. Defaults to the current quarter.
    pub period_start: Option<String>,
    /// Last day of the tax period. Defaults to the current quarter.
    pub period_end: Option<String>,
}

/// Response for a VAT summary.
#[derive(Debug, Serialize)]
pub struct VatSummaryResponse {
    /// Company the summary was requested for.
    pub company_id: String,
    /// First day of the period.
    pub period_start: String,
    /// Last day of the period.
    pub period_end: String,
    /// Currency.
    pub currency: String,
    /// VAT charged on sales.
    pub output_vat: String,
    /// VAT paid on purchases.
    pub input_vat: String,
    /// Output minus input; negative for a refund.
    pub net_payable: String,
    /// Whether the FTA owes the company.
    pub is_refund: bool,
    /// Standard-rated plus zero-rated sales.
    pub taxable_supplies: String,
    /// Sales split by rate.
    pub supplies: RateBreakdownResponse,
    /// Purchases split by rate.
    pub expenses: RateBreakdownResponse,
    /// Number of invoice and bill lines in the period.
    pub line_count: usize,
    /// Last day to file the return.
    pub filing_due_date: String,
}

/// Net amounts by VAT treatment.
#[derive(Debug, Serialize)]
pub struct RateBreakdownResponse {
    /// Standard-rated (5%).
    pub standard_rated: String,
    /// Zero-rated.
    pub zero_rated: String,
    /// Exempt.
    pub exempt: String,
}

/// A recorded VAT return.
#[derive(Debug, Serialize)]
pub struct VatReturnResponse {
    /// Return ID.
    pub id: Uuid,
    /// First day of the period.
    pub period_start: String,
    /// Last day of the period.
    pub period_end: String,
    /// Output VAT.
    pub output_vat: String,
    /// Input VAT.
    pub input_vat: String,
    /// Net payable.
    pub net_payable: String,
    /// Draft or filed.
    pub status: &'static str,
    /// Filing timestamp (RFC 3339).
    pub filed_at: Option<String>,
    /// FTA reference.
    pub reference: Option<String>,
}

/// Response listing VAT returns.
#[derive(Debug, Serialize)]
pub struct VatReturnsResponse {
    /// Company the list was requested for.
    pub company_id: String,
    /// Currency.
    pub currency: String,
    /// Returns, newest period first.
    pub returns: Vec<VatReturnResponse>,
}

async fn get_vat_summary(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<VatSummaryQuery>,
) -> Result<Json<VatSummaryResponse>, ApiError> {
    let quarter = DateRange::quarter_containing(today_in_uae());
    let period_start = query
        .period_start
        .unwrap_or_else(|| quarter.start().to_string());
    let period_end = query.period_end.unwrap_or_else(|| quarter.end().to_string());

    let summary = state
        .queries
        .calculate_vat_summary(&company_id, &period_start, &period_end)
        .await
        .map_err(|e| {
            ApiError::from_report(e, || {
                let range = DateRange::new(
                    fallback_date("period_start", &period_start),
                    fallback_date("period_end", &period_end),
                )
                .unwrap_or(quarter);
                vat_summary_to_response(&company_id, &state.currency, &VatSummary::empty(range))
            })
        })?;

    Ok(Json(vat_summary_to_response(
        &company_id,
        &state.currency,
        &summary,
    )))
}

async fn list_vat_returns(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<VatReturnsResponse>, ApiError> {
    let returns = state
        .queries
        .get_vat_returns(&company_id)
        .await
        .map_err(|e| {
            ApiError::from_report(e, || VatReturnsResponse {
                company_id: company_id.clone(),
                currency: state.currency.clone(),
                returns: Vec::new(),
            })
        })?;

    Ok(Json(VatReturnsResponse {
        company_id,
        currency: state.currency,
        returns: returns.iter().map(vat_return_to_response).collect(),
    }))
}

/// Converts a VAT summary to response.
pub(crate) fn vat_summary_to_response(
    company_id: &str,
    currency: &str,
    summary: &VatSummary,
) -> VatSummaryResponse {
    VatSummaryResponse {
        company_id: company_id.to_string(),
        period_start: summary.period_start.to_string(),
        period_end: summary.period_end.to_string(),
        currency: currency.to_string(),
        output_vat: format_money(summary.output_vat),
        input_vat: format_money(summary.input_vat),
        net_payable: format_money(summary.net_payable),
        is_refund: summary.is_refund(),
        taxable_supplies: format_money(summary.taxable_supplies),
        supplies: RateBreakdownResponse {
            standard_rated: format_money(summary.standard_rated_supplies),
            zero_rated: format_money(summary.zero_rated_supplies),
            exempt: format_money(summary.exempt_supplies),
        },
        expenses: RateBreakdownResponse {
            standard_rated: format_money(summary.standard_rated_expenses),
            zero_rated: format_money(summary.zero_rated_expenses),
            exempt: format_money(summary.exempt_expenses),
        },
        line_count: summary.line_count,
        filing_due_date: summary.filing_due_date.to_string(),
    }
}

fn vat_return_to_response(vat_return: &VatReturn) -> VatReturnResponse {
    VatReturnResponse {
        id: vat_return.id.into_inner(),
        period_start: vat_return.period_start.to_string(),
        period_end: vat_return.period_end.to_string(),
        output_vat: format_money(vat_return.output_vat),
        input_vat: format_money(vat_return.input_vat),
        net_payable: format_money(vat_return.net_payable),
        status: vat_return.status.as_str(),
        filed_at: vat_return.filed_at.map(|at| at.to_rfc3339()),
        reference: vat_return.reference.clone(),
    }
}
