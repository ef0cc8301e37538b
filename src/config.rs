mod cors;
mod server;

pub use cors::{parse_list, CorsConfig, WILDCARD};
pub use server::ServerConfig;

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration, reading `env_file` (or `./.env` when absent) first.
    pub fn load(env_file: Option<&Path>) -> AppResult<Self> {
        match env_file {
            Some(path) => Self::from_env_file(path),
            None => Self::from_env(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a dotenv-style file. Keys missing from the
    /// file fall back to the process environment.
    pub fn from_env_file(path: &Path) -> AppResult<Self> {
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            AppError::Configuration(format!("Cannot read env file {}: {}", path.display(), e))
        })?;

        let mut vars = HashMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                AppError::Configuration(format!("Invalid env file {}: {}", path.display(), e))
            })?;
            vars.insert(key, value);
        }

        Self::from_lookup(|key| vars.get(key).cloned().or_else(|| env::var(key).ok()))
    }

    /// Build configuration from an arbitrary key lookup, applying defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("SERVER_HOST").unwrap_or(defaults.server.host);
        let port = parse_var(&lookup, "SERVER_PORT", defaults.server.port)?;

        // CORS config
        let allowed_origins = list_var(&lookup, "CORS_ALLOWED_ORIGINS", defaults.cors.allowed_origins);
        let allowed_methods = list_var(&lookup, "CORS_ALLOWED_METHODS", defaults.cors.allowed_methods);
        let allowed_headers = list_var(&lookup, "CORS_ALLOWED_HEADERS", defaults.cors.allowed_headers);
        let expose_headers = list_var(&lookup, "CORS_EXPOSE_HEADERS", defaults.cors.expose_headers);
        let allow_credentials = parse_var(
            &lookup,
            "CORS_ALLOW_CREDENTIALS",
            defaults.cors.allow_credentials,
        )?;
        let max_age_seconds = parse_var(
            &lookup,
            "CORS_MAX_AGE_SECONDS",
            defaults.cors.max_age_seconds,
        )?;
        let credentialed_wildcard = parse_var(
            &lookup,
            "CORS_CREDENTIALED_WILDCARD",
            defaults.cors.credentialed_wildcard,
        )?;

        let config = Config {
            server: ServerConfig { host, port },
            cors: CorsConfig {
                allowed_origins,
                allow_credentials,
                allowed_methods,
                allowed_headers,
                expose_headers,
                max_age_seconds,
                credentialed_wildcard,
            },
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate().map_err(AppError::Configuration)?;
        self.cors.validate().map_err(AppError::Configuration)?;
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

fn list_var<F>(lookup: &F, key: &str, default: Vec<String>) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|raw| parse_list(&raw)).unwrap_or(default)
}
