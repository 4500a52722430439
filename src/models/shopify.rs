use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrdersResponse {
    pub orders: Vec<JsonValue>,
}
