use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    controller::AppJson, error::AppError, model::user::CredentialsDto, service::auth::AuthService,
    state::AppState,
};

/// POST /signup
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<CredentialsDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.jwt_secret)
        .sign_up(credentials)
        .await?;

    Ok(Json(session))
}

/// POST /signin
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<CredentialsDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.jwt_secret)
        .sign_in(credentials)
        .await?;

    Ok(Json(session))
}
