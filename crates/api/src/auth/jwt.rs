//! Local verification of provider-issued access tokens.
//!
//! Supabase signs user access tokens with the project's JWT secret (HS256,
//! audience `authenticated`). When that secret is configured, tokens are
//! checked here without a round trip to the provider.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::identity::DirectoryUser;

/// Audience claim carried by signed-in user tokens.
pub const AUDIENCE: &str = "authenticated";

/// Claims of a user access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account id.
    pub sub: Uuid,
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<Claims> for DirectoryUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.user_metadata.name,
            // Only confirmed accounts can sign in and receive a token.
            email_confirmed: true,
        }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the HS256 signature, expiration and audience.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUDIENCE]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign an access token the way the provider does. Used by local tooling and tests.
pub fn generate_access_token(
    user_id: Uuid,
    email: Option<&str>,
    name: Option<&str>,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        aud: AUDIENCE.to_string(),
        email: email.map(str::to_string),
        role: Some(AUDIENCE.to_string()),
        user_metadata: UserMetadata {
            name: name.map(str::to_string),
        },
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    #[test]
    fn test_generate_and_validate_access_token() {
        let id = Uuid::new_v4();
        let token = generate_access_token(id, Some("ada@example.com"), Some("Ada"), SECRET, 3600)
            .expect("token generation should succeed");

        let claims = validate_token(&token, SECRET).expect("token validation should succeed");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.aud, AUDIENCE);
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.user_metadata.name.as_deref(), Some("Ada"));
        assert!(claims.exp > claims.iat);

        let user = DirectoryUser::from(claims);
        assert_eq!(user.id, id);
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_expired_token_fails() {
        // Well beyond the default 60-second leeway.
        let token = generate_access_token(Uuid::new_v4(), None, None, SECRET, -600)
            .expect("encoding should succeed");

        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let token = generate_access_token(Uuid::new_v4(), None, None, "secret-alpha", 3600)
            .expect("encoding should succeed");

        assert!(validate_token(&token, "secret-bravo").is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            aud: "service_role".to_string(),
            email: None,
            role: None,
            user_metadata: UserMetadata::default(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, SECRET).is_err());
    }
}
