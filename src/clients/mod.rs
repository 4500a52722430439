pub mod llm;
pub mod shopify;
pub mod whatsapp;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::{
    config::Config,
    errors::{ConfigError, RelayError, UpstreamFailure},
    models::provider::Provider,
};

/// One pooled client shared by every adapter.
pub fn build_http_client(config: &Config) -> Result<Client, ConfigError> {
    let mut builder = Client::builder();

    if let Some(seconds) = config.upstream_timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    builder
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|_| ConfigError::InvalidValue {
            name: "base URL",
            value: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Sends a single request and decodes a 2xx JSON body. Nothing is retried.
pub(crate) async fn send_json<T>(
    provider: Provider,
    request: RequestBuilder,
) -> Result<T, RelayError>
where
    T: DeserializeOwned,
{
    let response = request.send().await.map_err(|e| {
        warn!(
            provider = %provider,
            timed_out = e.is_timeout(),
            error = %e,
            "Provider request did not complete"
        );
        RelayError::upstream(provider, transport_failure(&e))
    })?;

    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(
            provider = %provider,
            status = status.as_u16(),
            body = %body,
            "Provider rejected request"
        );
        return Err(RelayError::upstream(
            provider,
            UpstreamFailure::Status(status.as_u16()),
        ));
    }

    response.json::<T>().await.map_err(|e| {
        warn!(provider = %provider, error = %e, "Provider response could not be decoded");

        let failure = if e.is_timeout() {
            UpstreamFailure::Timeout(e.to_string())
        } else {
            UpstreamFailure::Decode(e.to_string())
        };

        RelayError::upstream(provider, failure)
    })
}

fn transport_failure(error: &reqwest::Error) -> UpstreamFailure {
    if error.is_timeout() {
        UpstreamFailure::Timeout(error.to_string())
    } else {
        UpstreamFailure::Transport(error.to_string())
    }
}
