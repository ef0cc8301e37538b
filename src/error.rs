use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("Method not allowed: {method} {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allow: &'static str,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to bind to address {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, error_code) = match &self {
            AppError::RouteNotFound { .. } => {
                (StatusCode::NOT_FOUND, self.to_string(), "NOT_FOUND")
            }
            AppError::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                self.to_string(),
                "METHOD_NOT_ALLOWED",
            ),
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server misconfigured".to_string(),
                    "CONFIGURATION_ERROR",
                )
            }
            _ => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = json!({
            "error": error_code,
            "message": error_message,
        });

        let mut response = (status, Json(body)).into_response();
        if let AppError::MethodNotAllowed { allow, .. } = &self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(*allow));
        }
        response
    }
}

/// Result type alias for AppResult
pub type AppResult<T> = Result<T, AppError>;
