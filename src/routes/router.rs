use crate::config::CorsConfig;
use crate::cors::build_cors_layer;
use crate::error::AppResult;
use crate::middleware::request_id_middleware;
use axum::middleware;
use axum::routing::get;

use super::fallback;
use super::health;

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Create application router
pub fn create_router(cors_config: &CorsConfig) -> AppResult<axum::Router> {
    let cors = build_cors_layer(cors_config)?;

    // axum answers HEAD with the GET handler unless HEAD is routed explicitly
    let health_route = get(health::health_check)
        .head(fallback::health_method_not_allowed)
        .fallback(fallback::health_method_not_allowed);

    let router = axum::Router::new()
        .route(HEALTH_PATH, health_route)
        .fallback(fallback::not_found)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware));

    Ok(router)
}
