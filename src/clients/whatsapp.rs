use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, info};
use url::Url;

use crate::{
    clients::{endpoint, send_json},
    config::{Config, CredentialName},
    errors::{ConfigError, RelayError},
    models::{provider::Provider, response::SendResult, whatsapp::WhatsAppTextMessage},
};

pub struct WhatsAppClient {
    http_client: Client,
    messages_url: Url,
    token: String,
}

impl WhatsAppClient {
    pub fn new(config: &Config, http_client: Client) -> Result<Self, ConfigError> {
        let messages_url = endpoint(
            &config.whatsapp_api_base_url,
            &[config.whatsapp_phone_number_id.trim(), "messages"],
        )?;

        info!(
            phone_number_id = %config.whatsapp_phone_number_id,
            "WhatsApp client initialized"
        );

        Ok(Self {
            http_client,
            messages_url,
            token: config
                .credentials
                .get(CredentialName::WhatsAppToken)
                .to_string(),
        })
    }

    pub fn messages_url(&self) -> &Url {
        &self.messages_url
    }

    pub async fn send(&self, phone_number: &str, message: &str) -> Result<SendResult, RelayError> {
        debug!(to = phone_number, "Sending WhatsApp text message");

        let request = self
            .http_client
            .post(self.messages_url.clone())
            .bearer_auth(&self.token)
            .json(&WhatsAppTextMessage::new(phone_number, message));

        let response: JsonValue = send_json(Provider::WhatsApp, request).await?;

        info!(to = phone_number, "WhatsApp message sent");

        Ok(SendResult {
            message: "WhatsApp message sent".to_string(),
            response,
        })
    }
}
