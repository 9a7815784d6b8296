//! Authentication extractors
//!
//! Extracts and validates bearer tokens from the Authorization header. Tokens
//! are issued by the external auth provider; only verification happens here.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use toolrank_common::{AppError, Claims};
use toolrank_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
    /// Verified claims, including provider metadata
    pub claims: Claims,
}

impl AuthUser {
    fn from_bearer(state: &AppState, token: &str) -> Result<Self, ApiError> {
        let claims = state
            .jwt_service()
            .validate_access_token(token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                match e {
                    AppError::TokenExpired => ApiError::App(e),
                    _ => ApiError::InvalidAuthFormat,
                }
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(Self { user_id, claims })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        AuthUser::from_bearer(&AppState::from_ref(state), bearer.token())
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// The caller's id, if signed in
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|auth| &auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let auth = AuthUser::from_bearer(&AppState::from_ref(state), bearer.token())?;
                Ok(OptionalAuthUser(Some(auth)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}

/// Authenticated user holding the configured admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        if !auth.claims.has_role(app_state.admin_role()) {
            tracing::warn!(user_id = %auth.user_id, "Admin endpoint called without admin role");
            return Err(ApiError::Forbidden);
        }

        Ok(AdminUser(auth))
    }
}
