use crate::routes::types::HealthCheckResponse;
use axum::Json;

/// Liveness endpoint. Touches no state and cannot fail.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
