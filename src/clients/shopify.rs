use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::{
    clients::{endpoint, send_json},
    config::{Config, CredentialName},
    errors::{ConfigError, RelayError},
    models::{provider::Provider, response::OrderList, shopify::ShopifyOrdersResponse},
};

const SHOPIFY_API_VERSION: &str = "2023-10";

pub struct ShopifyClient {
    http_client: Client,
    orders_url: Url,
    api_key: String,
    api_secret: String,
}

impl ShopifyClient {
    pub fn new(config: &Config, http_client: Client) -> Result<Self, ConfigError> {
        let orders_url = endpoint(
            &config.shopify_store_url,
            &["admin", "api", SHOPIFY_API_VERSION, "orders.json"],
        )?;

        info!(store_url = %config.shopify_store_url, "Shopify client initialized");

        Ok(Self {
            http_client,
            orders_url,
            api_key: config
                .credentials
                .get(CredentialName::ShopifyApiKey)
                .to_string(),
            api_secret: config
                .credentials
                .get(CredentialName::ShopifyApiSecret)
                .to_string(),
        })
    }

    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }

    pub async fn list_orders(&self, limit: u32) -> Result<OrderList, RelayError> {
        debug!(limit, "Fetching Shopify orders");

        let request = self
            .http_client
            .get(self.orders_url.clone())
            .query(&[("limit", limit)])
            .basic_auth(&self.api_key, Some(&self.api_secret));

        let body: ShopifyOrdersResponse = send_json(Provider::Shopify, request).await?;

        info!(count = body.orders.len(), "Fetched Shopify orders");

        Ok(OrderList {
            message: "Fetched Shopify orders".to_string(),
            orders: body.orders,
        })
    }
}
