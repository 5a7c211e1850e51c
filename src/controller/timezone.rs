use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{error::AppError, service::timezone::TimezoneService, state::AppState};

/// Query parameters for the timezone endpoint. Both are parsed by hand so a
/// missing parameter and an unparsable one get distinct error messages.
#[derive(Deserialize)]
pub struct TimezoneQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// GET /timezone?lat=&lng=
pub async fn get_timezone(
    State(state): State<AppState>,
    Query(query): Query<TimezoneQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
        return Err(AppError::BadRequest(
            "Missing lat or lng parameters".to_string(),
        ));
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid lat parameter".to_string()))?;
    let lng: f64 = lng
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid lng parameter".to_string()))?;

    let timezone = TimezoneService::new(
        &state.http_client,
        &state.timezone_cache,
        state.timezonedb_api_key.as_deref(),
    )
    .lookup(lat, lng)
    .await;

    Ok(Json(timezone))
}
