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
    model::mission::{CreateMissionDto, UpdateMissionDto},
    service::mission::MissionService,
    state::AppState,
};

/// POST /api/missions
pub async fn create_mission(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(dto): AppJson<CreateMissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let mission = MissionService::new(&state.db).create(&user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(mission)))
}

/// GET /api/missions
pub async fn list_missions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let missions = MissionService::new(&state.db).list(&user.id).await?;

    Ok(Json(missions))
}

/// GET /api/missions/{id}
pub async fn get_mission(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mission = MissionService::new(&state.db).get(&user.id, &id).await?;

    Ok(Json(mission))
}

/// PUT /api/missions/{id}
pub async fn update_mission(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateMissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let mission = MissionService::new(&state.db)
        .update(&user.id, &id, dto)
        .await?;

    Ok(Json(mission))
}

/// DELETE /api/missions/{id}
pub async fn delete_mission(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    MissionService::new(&state.db).delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
