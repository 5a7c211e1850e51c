use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    controller::{
        auth::{sign_in, sign_up},
        flight::{create_flight, delete_flight, get_flight, list_flights, update_flight},
        health::health,
        mission::{create_mission, delete_mission, get_mission, list_missions, update_mission},
        timezone::get_timezone,
    },
    error::{config::ConfigError, AppError},
    middleware::auth::require_auth,
    model::api::ErrorDto,
    state::AppState,
};

/// Builds the application router.
///
/// Flight and mission routes live under `/api` behind the bearer-token
/// layer; signup, signin, timezone, and health are public. The outer layers
/// add CORS for the configured frontend origin, request tracing, and a panic
/// boundary that turns any unhandled fault into a generic 500 instead of
/// taking the process down.
pub fn router(state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors = cors_layer(frontend_url)?;

    let api = Router::new()
        .route("/flights", post(create_flight).get(list_flights))
        .route(
            "/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
        .route("/missions", post(create_mission).get(list_missions))
        .route(
            "/missions/{id}",
            get(get_mission).put(update_mission).delete(delete_mission),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let router = Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/timezone", get(get_timezone))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

fn cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    let origin =
        frontend_url
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: "FRONTEND_URL".to_string(),
                reason: format!("'{frontend_url}' is not a valid origin"),
            })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Recovered from panic: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDto {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}
