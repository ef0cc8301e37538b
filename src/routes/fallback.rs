use crate::error::AppError;
use axum::http::{Method, Uri};

/// Methods served by the liveness route, advertised in `Allow`.
pub const HEALTH_ALLOW: &str = "GET";

/// Router-wide fallback for unmatched paths
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}

/// Fallback for methods the liveness route does not serve, HEAD included
pub async fn health_method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
        allow: HEALTH_ALLOW,
    }
}
