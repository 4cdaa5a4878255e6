//! Mapping of report errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use daftar_core::reports::ReportError;
use daftar_shared::AppError;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

/// An error answered as `{ "error", "message" }` JSON.
///
/// Not-found errors also carry the zeroed report under `"report"` so clients
/// can render an empty statement.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    report: Option<Value>,
}

impl ApiError {
    /// Wraps `err`, attaching `empty()` as the fallback report when the
    /// company or its data could not be found.
    pub fn from_report<T, F>(err: ReportError, empty: F) -> Self
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        let report = if err.is_not_found() {
            serde_json::to_value(empty()).ok()
        } else {
            None
        };
        Self {
            error: err.into(),
            report,
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self {
            error: err.into(),
            report: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.error.to_string();

        match &self.error {
            AppError::Internal(_) => error!(error = %message, "Report request failed"),
            AppError::NotFound(_) => warn!(error = %message, "Report target not found"),
            AppError::Validation(_) => debug!(error = %message, "Rejected report request"),
        }

        let mut body = json!({
            "error": self.error.error_code(),
            "message": message,
        });
        if let (Some(report), Some(map)) = (self.report, body.as_object_mut()) {
            map.insert("report".to_string(), report);
        }

        (status, Json(body)).into_response()
    }
}
