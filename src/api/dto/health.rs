//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each store.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub cache: CheckStatus,
    pub database: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn from_probe(ok: bool, ok_message: &str, error_message: &str) -> Self {
        if ok {
            Self {
                status: "ok".to_string(),
                message: Some(ok_message.to_string()),
            }
        } else {
            Self {
                status: "error".to_string(),
                message: Some(error_message.to_string()),
            }
        }
    }
}
