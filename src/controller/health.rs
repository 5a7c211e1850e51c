use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "Server is healthy")
}
