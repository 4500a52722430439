use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderList {
    pub message: String,
    pub orders: Vec<JsonValue>,
}

/// Label plus the provider's body, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderReply {
    pub message: String,
    pub response: JsonValue,
}

pub type ChatReply = ProviderReply;

pub type SendResult = ProviderReply;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
