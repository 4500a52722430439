use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: HashMap<String, ServiceHealth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholder_credentials: Vec<String>,
}

impl ServiceHealth {
    pub fn healthy(endpoint: Option<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            endpoint,
            placeholder_credentials: Vec::new(),
        }
    }

    pub fn degraded(endpoint: Option<String>, placeholder_credentials: Vec<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            endpoint,
            placeholder_credentials,
        }
    }
}
