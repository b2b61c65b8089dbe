//! Per-request failures.
//!
//! Handlers return `Result<_, AppError>`; the panic recovery middleware maps
//! panics onto the same type. Either way the client sees one fixed response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Body of the fixed server-error response.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A handler could not assemble its response.
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),

    /// A handler panicked; the payload message is kept for the log.
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
    }
}
