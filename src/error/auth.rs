use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization` header was present on a protected route.
    #[error("Authorization header is required")]
    MissingAuthHeader,

    /// The `Authorization` header was not of the form `Bearer <token>`.
    #[error("Invalid authorization header format")]
    InvalidHeaderFormat,

    /// The bearer token failed signature verification, was expired, or was
    /// otherwise malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// The token verified but carried no usable subject claim.
    #[error("Invalid user ID in token")]
    MissingSubject,

    /// A handler requested the authenticated caller but the auth layer never
    /// ran for this route.
    #[error("No authenticated user in request")]
    MissingAuthContext,

    /// Signin with an unknown email or a wrong password. Both cases map to
    /// the same error so the response does not reveal which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Converts authentication errors into HTTP responses.
///
/// Every variant maps to 401 Unauthorized except `MissingAuthContext`, which is
/// a routing misconfiguration and reported as 500. The error's display message
/// is returned in the body.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingAuthContext => {
                tracing::error!("Auth layer missing: handler requested a user on an unprotected route");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
