use serde::{Deserialize, Serialize};
use url::Url;

/// Token that stands for "anything" in every CORS list
pub const WILDCARD: &str = "*";

/// Exposed by default so browser clients can read the correlation id
const REQUEST_ID_HEADER: &str = "x-request-id";

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins (use ["*"] for all origins)
    pub allowed_origins: Vec<String>,

    /// Whether `Access-Control-Allow-Credentials: true` is sent
    pub allow_credentials: bool,

    /// Allowed request methods (use ["*"] for all methods)
    pub allowed_methods: Vec<String>,

    /// Allowed request headers (use ["*"] for all headers)
    pub allowed_headers: Vec<String>,

    /// Response headers exposed to the browser
    pub expose_headers: Vec<String>,

    /// Lifetime of a cached preflight response in seconds
    pub max_age_seconds: u64,

    /// Serve wildcards together with credentials by mirroring the request
    pub credentialed_wildcard: bool,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        is_wildcard(&self.allowed_origins)
    }

    pub fn allows_any_method(&self) -> bool {
        is_wildcard(&self.allowed_methods)
    }

    pub fn allows_any_header(&self) -> bool {
        is_wildcard(&self.allowed_headers)
    }

    pub fn exposes_any_header(&self) -> bool {
        is_wildcard(&self.expose_headers)
    }

    /// True when wildcards have to be answered by echoing the request.
    pub fn mirrors_wildcards(&self) -> bool {
        self.allow_credentials && self.credentialed_wildcard
    }

    /// Validate CORS configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_origins.is_empty() {
            return Err("CORS_ALLOWED_ORIGINS must list at least one origin".to_string());
        }

        if self.allowed_methods.is_empty() {
            return Err("CORS_ALLOWED_METHODS must list at least one method".to_string());
        }

        if self.allowed_headers.is_empty() {
            return Err("CORS_ALLOWED_HEADERS must list at least one header".to_string());
        }

        if self.allow_credentials && !self.credentialed_wildcard {
            let wildcards: Vec<&str> = [
                ("CORS_ALLOWED_ORIGINS", self.allows_any_origin()),
                ("CORS_ALLOWED_METHODS", self.allows_any_method()),
                ("CORS_ALLOWED_HEADERS", self.allows_any_header()),
            ]
            .into_iter()
            .filter_map(|(key, wild)| wild.then_some(key))
            .collect();

            if !wildcards.is_empty() {
                return Err(format!(
                    "{} cannot be \"*\" while CORS_ALLOW_CREDENTIALS is enabled; \
                     list explicit values or set CORS_CREDENTIALED_WILDCARD=true",
                    wildcards.join(", ")
                ));
            }
        }

        if self.allow_credentials && self.exposes_any_header() {
            return Err(
                "CORS_EXPOSE_HEADERS cannot be \"*\" while CORS_ALLOW_CREDENTIALS is enabled"
                    .to_string(),
            );
        }

        if !self.allows_any_origin() {
            for origin in &self.allowed_origins {
                validate_origin(origin)?;
            }
        }

        Ok(())
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![WILDCARD.to_string()],
            allow_credentials: false,
            allowed_methods: vec![WILDCARD.to_string()],
            allowed_headers: vec![WILDCARD.to_string()],
            expose_headers: vec![REQUEST_ID_HEADER.to_string()],
            max_age_seconds: 600,
            credentialed_wildcard: false,
        }
    }
}

/// Split a comma-separated setting, collapsing anything containing "*" to ["*"].
pub fn parse_list(raw: &str) -> Vec<String> {
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    if is_wildcard(&items) {
        vec![WILDCARD.to_string()]
    } else {
        items
    }
}

fn is_wildcard(items: &[String]) -> bool {
    items.iter().any(|item| item == WILDCARD)
}

/// Origins are compared byte-for-byte by browsers, so only the bare
/// `scheme://host[:port]` serialization is accepted.
fn validate_origin(origin: &str) -> Result<(), String> {
    let parsed = Url::parse(origin).map_err(|e| format!("Invalid CORS origin {origin:?}: {e}"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "Invalid CORS origin {origin:?}: scheme must be http or https"
        ));
    }

    let serialized = parsed.origin().ascii_serialization();
    if serialized != origin {
        return Err(format!(
            "Invalid CORS origin {origin:?}: expected a bare origin such as {serialized:?}"
        ));
    }

    Ok(())
}
