//! Handlers for account administration (sign-up, password reset, deletion).
//!
//! These endpoints are public: they act on behalf of a user identified only
//! by email and use the identity provider's admin API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::error::CoreError;
use learnpath_core::types::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::identity::DirectoryUser;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: String,
}

/// Request body for `POST /reset-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
}

/// Request body for `POST /delete-user`.
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(default)]
    pub email: String,
}

/// Public account info returned by sign-up.
#[derive(Debug, Serialize)]
pub struct AccountInfo {
    pub id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<DirectoryUser> for AccountInfo {
    fn from(user: DirectoryUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/signup
///
/// Create a confirmed account. An existing unconfirmed account with the same
/// email is replaced; a confirmed one is a conflict.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim();
    let name = input.name.trim();
    if email.is_empty() || input.password.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest(
            "Email, password, and name are required".into(),
        ));
    }
    input.validate().map_err(CoreError::from)?;

    if let Some(existing) = state.identity.find_user_by_email(email).await? {
        if existing.email_confirmed {
            return Err(AppError::Core(CoreError::Conflict(
                "A user with this email address has already been registered".into(),
            )));
        }
        state.identity.delete_user(existing.id).await?;
        tracing::info!(user_id = %existing.id, "Replaced unconfirmed account");
    }

    let user = state
        .identity
        .create_user(email, &input.password, name)
        .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AccountInfo::from(user),
        }),
    ))
}

/// POST /api/v1/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let email = input.email.trim();
    if email.is_empty() || input.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and new password are required".into(),
        ));
    }

    let user = find_by_email(&state, email).await?;
    state
        .identity
        .update_password(user.id, &input.new_password)
        .await?;

    tracing::info!(user_id = %user.id, "Password reset");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "Password has been reset successfully".into(),
        },
    }))
}

/// POST /api/v1/delete-user
pub async fn delete_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<DeleteUserRequest>,
) -> AppResult<Json<DataResponse<MessageResponse>>> {
    let email = input.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }

    let user = find_by_email(&state, email).await?;
    state.identity.delete_user(user.id).await?;

    tracing::info!(user_id = %user.id, "User deleted");

    Ok(Json(DataResponse {
        data: MessageResponse {
            message: "User account has been deleted successfully".into(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_by_email(state: &AppState, email: &str) -> AppResult<DirectoryUser> {
    state
        .identity
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: email.to_string(),
            })
        })
}
