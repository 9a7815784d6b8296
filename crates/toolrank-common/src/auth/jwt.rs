//! JWT utilities for authentication
//!
//! Verifies HS256 bearer tokens signed by the external auth provider using the
//! `jsonwebtoken` crate. The provider owns sign-in and token issuance; the
//! `issue_token` helper exists for tests and local tooling that need a token
//! the server will accept.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use toolrank_core::UserId;

use crate::error::AppError;

/// Provider-managed metadata embedded in the token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl Claims {
    /// Get the subject as a validated user identity
    ///
    /// # Errors
    /// Returns an error if the subject is not a well-formed identity
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(self.sub.as_str()).map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the provider granted the given role
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.app_metadata.role.as_deref() == Some(role)
    }
}

/// JWT service for verifying (and, in tests, minting) tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: Option<String>,
}

impl JwtService {
    /// Create a new JWT service with the provider's shared secret
    #[must_use]
    pub fn new(secret: &str, audience: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        validation
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or carries a malformed subject
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        claims.user_id()?;
        Ok(claims)
    }

    /// Sign a token in the provider's format
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(
        &self,
        user_id: &UserId,
        role: Option<&str>,
        ttl_seconds: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            aud: self.audience.clone(),
            app_metadata: AppMetadata {
                role: role.map(String::from),
            },
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
