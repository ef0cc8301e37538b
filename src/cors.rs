//! CORS layer construction.
//!
//! Turns a [`CorsConfig`] into a tower-http [`CorsLayer`]. A list containing
//! `"*"` becomes [`Any`], except when credentials are allowed: browsers
//! reject a literal `*` next to `Access-Control-Allow-Credentials: true`, so
//! wildcards are then answered by mirroring the request (only possible when
//! `credentialed_wildcard` was set explicitly, see [`CorsConfig::validate`]).
//!
//! The layer answers preflight requests itself and never forwards them to
//! the router.

use std::time::Duration;

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer, ExposeHeaders};

use crate::config::CorsConfig;
use crate::error::{AppError, AppResult};

/// Build a `CorsLayer` for the given configuration.
pub fn build_cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    config.validate().map_err(AppError::Configuration)?;

    let mirror = config.mirrors_wildcards();

    let allow_origin = if config.allows_any_origin() {
        if mirror {
            AllowOrigin::mirror_request()
        } else {
            Any.into()
        }
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::Configuration(format!("Invalid CORS origin {origin:?}"))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let allow_methods = if config.allows_any_method() {
        if mirror {
            AllowMethods::mirror_request()
        } else {
            Any.into()
        }
    } else {
        AllowMethods::list(parse_methods(&config.allowed_methods)?)
    };

    let allow_headers = if config.allows_any_header() {
        if mirror {
            AllowHeaders::mirror_request()
        } else {
            Any.into()
        }
    } else {
        AllowHeaders::list(parse_header_names(&config.allowed_headers, "CORS_ALLOWED_HEADERS")?)
    };

    let expose_headers = if config.exposes_any_header() {
        Any.into()
    } else {
        ExposeHeaders::list(parse_header_names(&config.expose_headers, "CORS_EXPOSE_HEADERS")?)
    };

    let layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
        .expose_headers(expose_headers)
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(config.max_age_seconds));

    Ok(layer)
}

fn parse_methods(methods: &[String]) -> AppResult<Vec<Method>> {
    methods
        .iter()
        .map(|method| {
            Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(|_| {
                AppError::Configuration(format!("Invalid CORS_ALLOWED_METHODS entry {method:?}"))
            })
        })
        .collect()
}

fn parse_header_names(names: &[String], key: &str) -> AppResult<Vec<HeaderName>> {
    names
        .iter()
        .map(|name| {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| AppError::Configuration(format!("Invalid {key} entry {name:?}")))
        })
        .collect()
}
