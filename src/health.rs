use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::{
    config::{Config, CredentialName},
    models::{
        health::{HealthCheckResponse, HealthStatus, ServiceHealth},
        provider::Provider,
    },
};

/// Reports per-provider readiness from configuration alone; providers are never probed.
pub struct HealthChecker {
    config: Config,
    endpoints: HashMap<Provider, String>,
}

impl HealthChecker {
    pub fn new(config: Config, endpoints: HashMap<Provider, String>) -> Self {
        Self { config, endpoints }
    }

    pub fn check_all(&self) -> HealthCheckResponse {
        let mut checks = HashMap::new();

        for provider in [
            Provider::Shopify,
            Provider::Llm,
            Provider::WhatsApp,
            Provider::Payments,
        ] {
            checks.insert(provider.as_str().to_string(), self.check_provider(provider));
        }

        let status = if checks
            .values()
            .any(|health| health.status == HealthStatus::Degraded)
        {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthCheckResponse {
            status,
            timestamp: Utc::now(),
            checks,
        }
    }

    fn check_provider(&self, provider: Provider) -> ServiceHealth {
        let endpoint = self.endpoints.get(&provider).cloned();

        let placeholders: Vec<String> = credentials_for(provider)
            .iter()
            .filter(|name| self.config.credentials.is_placeholder(**name))
            .map(|name| name.env_var().to_string())
            .collect();

        debug!(
            provider = %provider,
            placeholder_count = placeholders.len(),
            "Provider configuration checked"
        );

        if placeholders.is_empty() {
            ServiceHealth::healthy(endpoint)
        } else {
            ServiceHealth::degraded(endpoint, placeholders)
        }
    }
}

fn credentials_for(provider: Provider) -> &'static [CredentialName] {
    match provider {
        Provider::Shopify => &[CredentialName::ShopifyApiKey, CredentialName::ShopifyApiSecret],
        Provider::Llm => &[CredentialName::XaiApiKey],
        Provider::WhatsApp => &[CredentialName::WhatsAppToken],
        Provider::Payments => &[CredentialName::StripeSecretKey],
    }
}
