use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    controller::AppJson,
    error::AppError,
    middleware::auth::AuthUser,
    model::flight::{CreateFlightDto, UpdateFlightDto},
    service::flight::FlightService,
    state::AppState,
};

/// POST /api/flights
pub async fn create_flight(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(dto): AppJson<CreateFlightDto>,
) -> Result<impl IntoResponse, AppError> {
    let flight = FlightService::new(&state.db).create(&user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(flight)))
}

/// GET /api/flights
pub async fn list_flights(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let flights = FlightService::new(&state.db).list(&user.id).await?;

    Ok(Json(flights))
}

/// GET /api/flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let flight = FlightService::new(&state.db).get(&user.id, &id).await?;

    Ok(Json(flight))
}

/// PUT /api/flights/{id}
pub async fn update_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateFlightDto>,
) -> Result<impl IntoResponse, AppError> {
    let flight = FlightService::new(&state.db)
        .update(&user.id, &id, dto)
        .await?;

    Ok(Json(flight))
}

/// DELETE /api/flights/{id}
pub async fn delete_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    FlightService::new(&state.db).delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
