//! The identity provider seam.
//!
//! Handlers never talk to the auth backend directly; they go through
//! [`IdentityProvider`], which production wires to Supabase
//! ([`SupabaseIdentity`](super::supabase::SupabaseIdentity)) and tests wire to
//! an in-memory directory.

use async_trait::async_trait;
use learnpath_core::types::UserId;

/// An account as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    pub id: UserId,
    pub email: Option<String>,
    /// Display name from the account metadata.
    pub name: Option<String>,
    pub email_confirmed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The bearer token is malformed, expired, or unknown to the provider.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The provider refused an admin operation (duplicate email, weak password, ...).
    #[error("Identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider could not be reached.
    #[error("Identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a body we could not interpret.
    #[error("Unexpected identity provider response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the account it was issued for.
    async fn verify_token(&self, token: &str) -> Result<DirectoryUser, IdentityError>;

    async fn find_user_by_email(&self, email: &str)
        -> Result<Option<DirectoryUser>, IdentityError>;

    /// Create an account whose email is already confirmed.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<DirectoryUser, IdentityError>;

    async fn update_password(&self, user_id: UserId, password: &str) -> Result<(), IdentityError>;

    async fn delete_user(&self, user_id: UserId) -> Result<(), IdentityError>;
}
