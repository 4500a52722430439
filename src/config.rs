use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
};

use axum::http::HeaderValue;
use dotenvy::dotenv;
use serde::Deserialize;
use url::Url;

use crate::{errors::ConfigError, logging::LogFormat};

const DEFAULT_WHATSAPP_API_BASE_URL: &str = "https://graph.facebook.com/v17.0";
const DEFAULT_LLM_API_URL: &str = "https://api.x.ai/v1/chat";

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_allowed_origin")]
    pub cors_allowed_origin: String,
    #[serde(default)]
    pub log_format: LogFormat,

    pub shopify_store_url: Url,

    pub whatsapp_phone_number_id: String,
    #[serde(default = "default_whatsapp_api_base_url")]
    pub whatsapp_api_base_url: Url,

    #[serde(default = "default_llm_api_url")]
    pub llm_api_url: Url,
    #[serde(default = "default_llm_max_tokens")]
    pub llm_max_tokens: u32,

    pub upstream_timeout_seconds: Option<u64>,

    #[serde(default)]
    pub allow_placeholder_credentials: bool,

    #[serde(skip)]
    pub credentials: Credentials,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Builds the config from explicit `(NAME, value)` pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let mut config = envy::from_iter::<_, Self>(vars.clone())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let credential_vars = envy::from_iter::<_, CredentialVars>(vars)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        config.validate()?;
        config.credentials =
            Credentials::resolve(&credential_vars, config.allow_placeholder_credentials)?;

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.whatsapp_phone_number_id.trim().is_empty() {
            return Err(ConfigError::MissingVar("WHATSAPP_PHONE_NUMBER_ID"));
        }

        if self.llm_max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LLM_MAX_TOKENS",
                value: self.llm_max_tokens.to_string(),
            });
        }

        if HeaderValue::from_str(&self.cors_allowed_origin).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "CORS_ALLOWED_ORIGIN",
                value: self.cors_allowed_origin.clone(),
            });
        }

        for (name, url) in [
            ("SHOPIFY_STORE_URL", &self.shopify_store_url),
            ("WHATSAPP_API_BASE_URL", &self.whatsapp_api_base_url),
            ("LLM_API_URL", &self.llm_api_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: url.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn default_service_name() -> String {
    "Sindbad Backend".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_whatsapp_api_base_url() -> Url {
    Url::parse(DEFAULT_WHATSAPP_API_BASE_URL).expect("default WhatsApp URL is valid")
}

fn default_llm_api_url() -> Url {
    Url::parse(DEFAULT_LLM_API_URL).expect("default LLM URL is valid")
}

fn default_llm_max_tokens() -> u32 {
    100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialName {
    ShopifyApiKey,
    ShopifyApiSecret,
    WhatsAppToken,
    XaiApiKey,
    StripeSecretKey,
}

impl CredentialName {
    pub const ALL: [CredentialName; 5] = [
        CredentialName::ShopifyApiKey,
        CredentialName::ShopifyApiSecret,
        CredentialName::WhatsAppToken,
        CredentialName::XaiApiKey,
        CredentialName::StripeSecretKey,
    ];

    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialName::ShopifyApiKey => "SHOPIFY_API_KEY",
            CredentialName::ShopifyApiSecret => "SHOPIFY_API_SECRET",
            CredentialName::WhatsAppToken => "WHATSAPP_TOKEN",
            CredentialName::XaiApiKey => "XAI_API_KEY",
            CredentialName::StripeSecretKey => "STRIPE_SECRET_KEY",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            CredentialName::ShopifyApiKey => "your-shopify-api-key",
            CredentialName::ShopifyApiSecret => "your-shopify-api-secret",
            CredentialName::WhatsAppToken => "your-whatsapp-token",
            CredentialName::XaiApiKey => "your-xai-api-key",
            CredentialName::StripeSecretKey => "your-stripe-secret-key",
        }
    }
}

#[derive(Deserialize)]
struct CredentialVars {
    shopify_api_key: Option<String>,
    shopify_api_secret: Option<String>,
    whatsapp_token: Option<String>,
    xai_api_key: Option<String>,
    stripe_secret_key: Option<String>,
}

impl CredentialVars {
    fn lookup(&self, name: CredentialName) -> Option<&str> {
        let value = match name {
            CredentialName::ShopifyApiKey => &self.shopify_api_key,
            CredentialName::ShopifyApiSecret => &self.shopify_api_secret,
            CredentialName::WhatsAppToken => &self.whatsapp_token,
            CredentialName::XaiApiKey => &self.xai_api_key,
            CredentialName::StripeSecretKey => &self.stripe_secret_key,
        };

        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Provider secrets resolved once at startup.
///
/// A missing credential is a startup error unless placeholders are allowed, in
/// which case it resolves to [`CredentialName::placeholder`].
#[derive(Clone, Default)]
pub struct Credentials {
    values: HashMap<CredentialName, String>,
    placeholders: Vec<CredentialName>,
}

impl Credentials {
    fn resolve(vars: &CredentialVars, allow_placeholders: bool) -> Result<Self, ConfigError> {
        let mut credentials = Self::default();

        for name in CredentialName::ALL {
            match vars.lookup(name) {
                Some(value) => {
                    credentials.values.insert(name, value.to_string());
                }
                None if allow_placeholders => {
                    credentials
                        .values
                        .insert(name, name.placeholder().to_string());
                    credentials.placeholders.push(name);
                }
                None => return Err(ConfigError::MissingCredential(name.env_var())),
            }
        }

        Ok(credentials)
    }

    pub fn get(&self, name: CredentialName) -> &str {
        self.values
            .get(&name)
            .map(String::as_str)
            .unwrap_or_else(|| name.placeholder())
    }

    pub fn is_placeholder(&self, name: CredentialName) -> bool {
        !self.values.contains_key(&name) || self.placeholders.contains(&name)
    }

    pub fn placeholders(&self) -> &[CredentialName] {
        &self.placeholders
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let names: Vec<&str> = self.values.keys().map(|name| name.env_var()).collect();

        f.debug_struct("Credentials")
            .field("configured", &names)
            .field(
                "placeholders",
                &self
                    .placeholders
                    .iter()
                    .map(|name| name.env_var())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
