//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for reports, VAT and the dashboard
//! - JSON response types with money rendered as major-unit strings
//! - Error mapping from report errors to HTTP responses

pub mod error;
pub mod routes;

use axum::Router;
use daftar_core::ReportQueries;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report and VAT query facade.
    pub queries: ReportQueries,
    /// Currency code stamped on every response.
    pub currency: String,
}

impl AppState {
    /// Creates the state.
    #[must_use]
    pub fn new(queries: ReportQueries, currency: impl Into<String>) -> Self {
        Self {
            queries,
            currency: currency.into(),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
