//! Invitation tokens and request authentication.
//!
//! Tokens are JWTs signed with the process-wide secret from [`Config`],
//! binding a user id and email to a 24-hour expiry. The same signer backs
//! the Bearer-token extractor used by authenticated endpoints.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;
use crate::http::AppState;
use crate::types::User;

/// Claims carried by an invitation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub email: String,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user with the given lifetime.
    pub fn new(user_id: i64, email: String, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signs and verifies invitation tokens with a shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Build an issuer from server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.signing_secret.as_bytes(), config.token_ttl_hours)
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(user.id, user.email.clone(), self.ttl);
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)?;

        if claims.is_expired() {
            return Err(jsonwebtoken::errors::ErrorKind::ExpiredSignature.into());
        }

        Ok(claims)
    }
}

/// Build the invitation link embedded in the outbound email.
pub fn invitation_url(public_host: &str, token: &str) -> String {
    format!("https://{}/auth?token={}", public_host, token)
}

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Any failure (missing header, bad signature, expired token, or a
/// user that no longer resolves or is inactive) rejects with 403 before the
/// handler runs, so unauthenticated requests never reach a data mutation.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::not_authenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::not_authenticated)?;

        let claims = state
            .tokens
            .verify(token)
            .map_err(|_| ApiError::not_authenticated())?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| ApiError::not_authenticated())?;

        let user = state
            .db
            .get_user(user_id)
            .map_err(ApiError::from)?
            .ok_or_else(ApiError::not_authenticated)?;

        if !user.is_active {
            return Err(ApiError::not_authenticated());
        }

        Ok(AuthUser(user))
    }
}
