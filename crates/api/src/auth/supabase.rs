//! Supabase (GoTrue) implementation of [`IdentityProvider`].
//!
//! Admin operations use the service-role key against
//! `/auth/v1/admin/users`. Access tokens are verified locally when
//! `SUPABASE_JWT_SECRET` is set and via `GET /auth/v1/user` otherwise.

use std::time::Duration;

use async_trait::async_trait;
use learnpath_core::types::UserId;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::auth::identity::{DirectoryUser, IdentityError, IdentityProvider};
use crate::auth::jwt::validate_token;

/// Page size used when searching the user directory by email.
const USERS_PAGE_SIZE: usize = 200;

/// Identity provider request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    pub service_role_key: String,
    /// JWT secret for local token verification.
    pub jwt_secret: Option<String>,
}

impl SupabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default |
    /// |-----------------------------|----------|---------|
    /// | `SUPABASE_URL`              | **yes**  | --      |
    /// | `SUPABASE_SERVICE_ROLE_KEY` | **yes**  | --      |
    /// | `SUPABASE_JWT_SECRET`       | no       | unset   |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        assert!(!url.trim().is_empty(), "SUPABASE_URL must not be empty");

        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .expect("SUPABASE_SERVICE_ROLE_KEY must be set");
        assert!(
            !service_role_key.is_empty(),
            "SUPABASE_SERVICE_ROLE_KEY must not be empty"
        );

        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            url: url.trim().trim_end_matches('/').to_string(),
            service_role_key,
            jwt_secret,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: UserId,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

impl From<GoTrueUser> for DirectoryUser {
    fn from(user: GoTrueUser) -> Self {
        let name = user
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("name"))
            .and_then(|n| n.as_str())
            .map(str::to_string);
        Self {
            id: user.id,
            email: user.email,
            name,
            email_confirmed: user.email_confirmed_at.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<GoTrueUser>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct SupabaseIdentity {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseIdentity {
    pub fn new(config: SupabaseConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.config.url)
    }

    /// Attach the service-role credentials used for admin calls.
    fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }

    async fn fetch_user(&self, token: &str) -> Result<DirectoryUser, IdentityError> {
        let response = self
            .client
            .get(self.endpoint("/user"))
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(IdentityError::InvalidToken);
        }
        let user: GoTrueUser = parse(response).await?;
        Ok(user.into())
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn verify_token(&self, token: &str) -> Result<DirectoryUser, IdentityError> {
        match &self.config.jwt_secret {
            Some(secret) => validate_token(token, secret)
                .map(DirectoryUser::from)
                .map_err(|e| {
                    tracing::debug!(error = %e, "Access token rejected");
                    IdentityError::InvalidToken
                }),
            None => self.fetch_user(token).await,
        }
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<DirectoryUser>, IdentityError> {
        let wanted = email.trim().to_lowercase();
        let mut page = 1;

        loop {
            let response = self
                .admin(self.client.get(self.endpoint("/admin/users")))
                .query(&[("page", page), ("per_page", USERS_PAGE_SIZE)])
                .send()
                .await?;
            let batch: UserPage = parse(response).await?;
            let count = batch.users.len();

            if let Some(user) = batch.users.into_iter().find(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase() == wanted)
            }) {
                return Ok(Some(user.into()));
            }
            if count < USERS_PAGE_SIZE {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<DirectoryUser, IdentityError> {
        let body = json!({
            "email": email,
            "password": password,
            "user_metadata": { "name": name },
            // No mail server is configured, so accounts are confirmed up front.
            "email_confirm": true,
        });
        let response = self
            .admin(self.client.post(self.endpoint("/admin/users")))
            .json(&body)
            .send()
            .await?;
        let user: GoTrueUser = parse(response).await?;
        tracing::info!(user_id = %user.id, "Account created");
        Ok(user.into())
    }

    async fn update_password(&self, user_id: UserId, password: &str) -> Result<(), IdentityError> {
        let response = self
            .admin(
                self.client
                    .put(self.endpoint(&format!("/admin/users/{user_id}"))),
            )
            .json(&json!({ "password": password }))
            .send()
            .await?;
        ensure_success(response).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), IdentityError> {
        let response = self
            .admin(
                self.client
                    .delete(self.endpoint(&format!("/admin/users/{user_id}"))),
            )
            .send()
            .await?;
        ensure_success(response).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, IdentityError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| IdentityError::Malformed(e.to_string()))
}

async fn ensure_success(response: Response) -> Result<(), IdentityError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    tracing::warn!(status = status.as_u16(), %message, "Identity provider rejected request");
    Err(IdentityError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// GoTrue reports errors under one of several keys depending on the endpoint.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
}
