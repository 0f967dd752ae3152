//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Ledger errors
    #[error(transparent)]
    Ledger(#[from] crate::domain::LedgerError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // Ledger errors - map to appropriate HTTP status
            AppError::Ledger(ref ledger_err) => {
                use crate::domain::LedgerError;
                match ledger_err {
                    LedgerError::NotFound(id) => (
                        StatusCode::NOT_FOUND,
                        "transaction_not_found",
                        Some(id.to_string()),
                    ),
                    LedgerError::AccountNotFound(id) => (
                        StatusCode::NOT_FOUND,
                        "account_not_found",
                        Some(id.to_string()),
                    ),
                    LedgerError::InsufficientFunds { .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "insufficient_funds",
                        Some(ledger_err.to_string()),
                    ),
                    LedgerError::Contention => {
                        // The unit rolled back cleanly; the client may retry.
                        (StatusCode::CONFLICT, "contention", None)
                    }
                    LedgerError::InvalidAmount(e) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "invalid_amount",
                        Some(e.to_string()),
                    ),
                    LedgerError::Database(e) => {
                        tracing::error!("Database error: {:?}", e);
                        (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
                    }
                }
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
