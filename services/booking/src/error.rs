//! Error types surfaced by the HTTP handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Handler-level errors. Validation problems carry the full ordered list
/// of user-facing messages; everything infrastructural collapses into a
/// generic internal-error body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Field-validation failures, reported all at once in order
    #[error("validation failed")]
    Validation(Vec<String>),

    /// Login failure; deliberately silent about which field was wrong
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Infrastructure failure (database, session store)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "errors": ["Invalid email or password."] })),
            )
                .into_response(),
            AppError::Internal(e) => {
                error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;
