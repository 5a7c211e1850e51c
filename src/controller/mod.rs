//! HTTP request handlers.
//!
//! Controllers stay thin: extract the authenticated caller and the payload,
//! call the matching service, and map the result onto a status code. All
//! error mapping happens through `AppError`'s `IntoResponse`.

pub mod auth;
pub mod flight;
pub mod health;
pub mod mission;
pub mod timezone;

use axum::extract::{rejection::JsonRejection, FromRequest, Request};

use crate::error::AppError;

/// JSON body extractor whose rejection maps onto the application's error
/// shape: malformed or mistyped bodies become a 400 with an `{"error": ...}`
/// body instead of axum's default plain-text rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))),
        }
    }
}
