//! Request extractors that report failures in the service's error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body.
///
/// Behaves like [`axum::Json`], but a missing field, a wrong type or a
/// non-JSON body is rejected as `400 {"error", "code"}` through [`AppError`]
/// instead of axum's plain-text 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
