use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::models::{provider::Provider, response::ErrorBody};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid or missing environment variable: {0}")]
    Invalid(String),
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Why a provider call did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    Status(u16),
    Timeout(String),
    Transport(String),
    Decode(String),
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", upstream_message(.provider, .failure))]
    Upstream {
        provider: Provider,
        failure: UpstreamFailure,
    },
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        RelayError::Validation(message.into())
    }

    pub fn upstream(provider: Provider, failure: UpstreamFailure) -> Self {
        RelayError::Upstream { provider, failure }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Provider bodies and transport details stay in the logs.
fn upstream_message(provider: &Provider, failure: &UpstreamFailure) -> String {
    match failure {
        UpstreamFailure::Status(code) => format!("{} returned status {}", provider, code),
        UpstreamFailure::Timeout(_) => format!("{} timed out", provider),
        UpstreamFailure::Transport(_) => format!("{} is unreachable", provider),
        UpstreamFailure::Decode(_) => format!("{} returned an unexpected response", provider),
    }
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        RelayError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RelayError {
    fn from(rejection: QueryRejection) -> Self {
        RelayError::Validation(rejection.body_text())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        warn!(status = status.as_u16(), error = %self, "Request failed");

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
