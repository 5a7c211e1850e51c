//! Bearer-token authentication for the `/api` routes.
//!
//! The middleware verifies the `Authorization: Bearer <token>` header and
//! stores the authenticated caller as a typed [`AuthUser`] request extension.
//! Handlers receive the caller as an explicit `AuthUser` parameter via its
//! extractor impl, so the identity is part of every protected handler's
//! signature rather than a dynamically-typed lookup.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{auth::AuthError, AppError},
    service::auth::verify_token,
    state::AppState,
};


/// The authenticated caller, extracted from the verified token's `sub` claim.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id (hex string). Every flight/mission operation is
    /// scoped to this id.
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AuthError::MissingAuthContext.into())
    }
}

/// Rejects requests without a valid bearer token and attaches the caller to
/// the request for downstream extraction.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let claims = verify_token(token, &state.jwt_secret)?;

    request.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    header
        .to_str()
        .map_err(|_| AuthError::InvalidHeaderFormat)?
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeaderFormat)
}
