//! API route definitions.

use axum::Router;
use daftar_shared::Fils;

use crate::AppState;

pub mod dashboard;
pub mod health;
pub mod reports;
pub mod vat;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(vat::routes())
        .merge(dashboard::routes())
}

/// Formats fils as a major-unit string with two decimals.
pub(crate) fn format_money(amount: Fils) -> String {
    amount.format_major()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use daftar_core::ReportQueries;
    use daftar_core::demo::DemoDataset;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{AppState, create_router};

    /// Year the demo books are built for in router tests.
    pub const YEAR: i32 = 2025;

    pub fn demo_state() -> AppState {
        let ledger = DemoDataset::build(YEAR).unwrap().into_ledger().unwrap();
        AppState::new(ReportQueries::new(Arc::new(ledger)), "AED")
    }

    pub async fn get(uri: &str) -> (StatusCode, Value) {
        let response = create_router(demo_state())
            .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
