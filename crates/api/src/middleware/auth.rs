//! Bearer-token session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use learnpath_core::error::CoreError;
use learnpath_core::types::UserId;

use crate::auth::identity::IdentityError;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller for one request.
///
/// Built fresh from the `Authorization` header on every request and passed to
/// the handler explicitly; every store key a handler touches is scoped by
/// `user_id`.
///
/// ```ignore
/// async fn my_handler(session: Session) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let user = state.identity.verify_token(token).await.map_err(|e| match e {
            IdentityError::InvalidToken => {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            }
            other => AppError::Identity(other),
        })?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}
