//! Dashboard route.
//!
//! One call fanning out to the trial balance, year-to-date profit and loss,
//! and the VAT summary of the quarter containing the as-of date. All three
//! succeed or the request fails.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use daftar_core::period::{DateRange, parse_iso_date, today_in_uae};
use daftar_core::reports::{ProfitAndLossReport, ReportError, ReportStatus, TrialBalanceReport};
use daftar_core::vat::VatSummary;
use serde::Serialize;
use tracing::debug;

use super::format_money;
use super::reports::AsOfQuery;
use super::vat::{VatSummaryResponse, vat_summary_to_response};
use crate::AppState;
use crate::error::ApiError;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/companies/{company_id}/dashboard", get(get_dashboard))
}

/// Response for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Company the dashboard was requested for.
    pub company_id: String,
    /// As-of date.
    pub as_of: String,
    /// Currency.
    pub currency: String,
    /// Ledger health.
    pub trial_balance: TrialBalanceSnapshot,
    /// Calendar year to the as-of date.
    pub year_to_date: ProfitSnapshot,
    /// VAT for the quarter containing the as-of date.
    pub vat: VatSummaryResponse,
}

/// Trial balance totals without the rows.
#[derive(Debug, Serialize)]
pub struct TrialBalanceSnapshot {
    /// Total debits.
    pub total_debit: String,
    /// Total credits.
    pub total_credit: String,
    /// Whether debits equal credits.
    pub is_balanced: bool,
    /// Data presence and balance check.
    pub status: ReportStatus,
}

/// Profit and loss headline figures.
#[derive(Debug, Serialize)]
pub struct ProfitSnapshot {
    /// Period start.
    pub start_date: String,
    /// Period end.
    pub end_date: String,
    /// Total revenue.
    pub revenue: String,
    /// Gross profit.
    pub gross_profit: String,
    /// Net profit.
    pub net_profit: String,
}

async fn get_dashboard(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let as_of = match query.as_of {
        Some(raw) => parse_iso_date("as_of", &raw).map_err(ReportError::from)?,
        None => today_in_uae(),
    };
    let ytd = DateRange::year_to_date(as_of);
    let quarter = DateRange::quarter_containing(as_of);

    let as_of_str = as_of.to_string();
    let (ytd_start, ytd_end) = (ytd.start().to_string(), ytd.end().to_string());
    let (vat_start, vat_end) = (quarter.start().to_string(), quarter.end().to_string());

    let queries = &state.queries;
    let result = tokio::try_join!(
        queries.get_trial_balance(&company_id, &as_of_str),
        queries.get_profit_and_loss(&company_id, &ytd_start, &ytd_end),
        queries.calculate_vat_summary(&company_id, &vat_start, &vat_end),
    );

    let (trial_balance, profit_and_loss, vat) = result.map_err(|e| {
        ApiError::from_report(e, || {
            dashboard_to_response(
                &company_id,
                &state.currency,
                &TrialBalanceReport::empty(as_of),
                &ProfitAndLossReport::empty(ytd),
                &VatSummary::empty(quarter),
            )
        })
    })?;

    debug!(%company_id, %as_of, "Dashboard assembled");

    Ok(Json(dashboard_to_response(
        &company_id,
        &state.currency,
        &trial_balance,
        &profit_and_loss,
        &vat,
    )))
}

fn dashboard_to_response(
    company_id: &str,
    currency: &str,
    trial_balance: &TrialBalanceReport,
    profit_and_loss: &ProfitAndLossReport,
    vat: &VatSummary,
) -> DashboardResponse {
    DashboardResponse {
        company_id: company_id.to_string(),
        as_of: trial_balance.as_of.to_string(),
        currency: currency.to_string(),
        trial_balance: TrialBalanceSnapshot {
            total_debit: format_money(trial_balance.total_debit),
            total_credit: format_money(trial_balance.total_credit),
            is_balanced: trial_balance.is_balanced,
            status: trial_balance.status,
        },
        year_to_date: ProfitSnapshot {
            start_date: profit_and_loss.start_date.to_string(),
            end_date: profit_and_loss.end_date.to_string(),
            revenue: format_money(profit_and_loss.total_revenue),
            gross_profit: format_money(profit_and_loss.gross_profit),
            net_profit: format_money(profit_and_loss.net_profit),
        },
        vat: vat_summary_to_response(company_id, currency, vat),
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::get;
    use axum::http::StatusCode;
    use daftar_core::demo::DEMO_COMPANY_ID;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_dashboard_combines_reports() {
        let uri = format!("/api/v1/companies/{DEMO_COMPANY_ID}/dashboard?as_of=2025-03-31");
        let (status, body) = get(&uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["as_of"], "2025-03-31");
        assert_eq!(body["trial_balance"]["status"], "balanced");
        assert_eq!(body["year_to_date"]["start_date"], "2025-01-01");
        assert_eq!(body["year_to_date"]["net_profit"], "-30138.75");
        assert_eq!(body["vat"]["period_start"], "2025-01-01");
        assert_eq!(body["vat"]["net_payable"], "1880.00");
    }

    #[tokio::test]
    async fn test_dashboard_rejects_bad_date() {
        let uri = format!("/api/v1/companies/{DEMO_COMPANY_ID}/dashboard?as_of=2025-3-31");
        let (status, _) = get(&uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_for_unknown_company() {
        let uri = format!(
            "/api/v1/companies/{}/dashboard?as_of=2025-06-15",
            Uuid::now_v7()
        );
        let (status, body) = get(&uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["report"]["trial_balance"]["status"], "no_data");
        assert_eq!(body["report"]["vat"]["period_start"], "2025-04-01");
        assert_eq!(body["report"]["year_to_date"]["end_date"], "2025-06-15");
    }
}
