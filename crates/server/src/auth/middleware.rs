use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::jwt;
use crate::config::Config;
use crate::error::AppError;

/// Marker extractor for admin-only handlers. Rejects requests without a
/// valid admin bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get("authorization")?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Config>()
            .ok_or(AppError::Internal("Missing config".into()))?;

        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        if jwt::is_admin_token(token, &config.jwt_secret) {
            Ok(AdminSession)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// Optional admin session. `true` when a valid admin token is present.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAdminSession(pub bool);

impl<S> FromRequestParts<S> for MaybeAdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AdminSession::from_request_parts(parts, state).await {
            Ok(_) => Ok(MaybeAdminSession(true)),
            Err(_) => Ok(MaybeAdminSession(false)),
        }
    }
}
