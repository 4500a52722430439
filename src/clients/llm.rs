use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, info};
use url::Url;

use crate::{
    clients::send_json,
    config::{Config, CredentialName},
    errors::RelayError,
    models::{llm::LlmPrompt, provider::Provider, response::ChatReply},
};

/// Stateless relay to the chat completion endpoint. No conversation history is kept.
pub struct LlmClient {
    http_client: Client,
    endpoint: Url,
    api_key: String,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(config: &Config, http_client: Client) -> Self {
        info!(
            endpoint = %config.llm_api_url,
            max_tokens = config.llm_max_tokens,
            "LLM client initialized"
        );

        Self {
            http_client,
            endpoint: config.llm_api_url.clone(),
            api_key: config.credentials.get(CredentialName::XaiApiKey).to_string(),
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn chat(&self, event: &str, message: &str) -> Result<ChatReply, RelayError> {
        debug!(event, prompt_chars = message.chars().count(), "Relaying prompt to LLM");

        let request = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&LlmPrompt {
                prompt: message,
                max_tokens: self.max_tokens,
            });

        let response: JsonValue = send_json(Provider::Llm, request).await?;

        info!(event, "LLM response received");

        Ok(ChatReply {
            message: format!("chatbot response: {}", event),
            response,
        })
    }
}
