use serde::{Deserialize, Serialize};

/// Liveness response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

impl HealthCheckResponse {
    pub const fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
        }
    }
}
