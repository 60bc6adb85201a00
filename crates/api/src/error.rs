use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use learnpath_core::error::CoreError;
use learnpath_core::llm_output::GenerationError;
use learnpath_db::StoreError;
use learnpath_llm::LlmError;
use serde_json::json;

use crate::auth::identity::IdentityError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `learnpath_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record or cache store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An identity provider failure.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The model was unreachable or answered with an error.
    #[error("Model error: {0}")]
    Llm(#[from] LlmError),

    /// The model answered but its output was unusable.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or mistyped request bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal()
            }

            // --- Identity provider errors ---
            AppError::Identity(err) => classify_identity_error(err),

            // --- Model errors ---
            AppError::Llm(err) => {
                tracing::warn!(error = %err, "Model request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The AI service is unavailable, please try again later".to_string(),
                )
            }
            AppError::Generation(err) => {
                tracing::warn!(error = %err, kind = err.kind(), "Generation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    format!("Content generation failed ({})", err.kind()),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify an identity provider error into an HTTP status, error code, and message.
///
/// - Invalid tokens map to 401.
/// - Client-side rejections (4xx from the provider) map to 400 with the provider's message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_identity_error(err: &IdentityError) -> (StatusCode, &'static str, String) {
    match err {
        IdentityError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid or expired token".to_string(),
        ),
        IdentityError::Rejected { status, message } if (400..500).contains(status) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone())
        }
        other => {
            tracing::error!(error = %other, "Identity provider error");
            internal()
        }
    }
}
