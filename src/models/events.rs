use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{
    errors::RelayError,
    models::validation::{
        MAX_CHAT_MESSAGE_CHARS, MAX_OUTBOUND_MESSAGE_CHARS, Validate, validate_amount,
        validate_currency, validate_max_chars, validate_page_size, validate_phone_number,
        validate_required,
    },
};

pub const DEFAULT_ORDER_PAGE_SIZE: u32 = 10;

/// Generic webhook payload. Anything besides `event` is kept for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub event: String,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Shopify sends numeric ids; hand-written test hooks often send strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrderId::Number(n) => write!(f, "{}", n),
            OrderId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A monetary amount as received, either a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(Number),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => n.as_f64(),
            Amount::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWebhookEvent {
    pub id: OrderId,
    pub total_price: Amount,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWebhookEvent {
    pub event: String,
    pub amount: Amount,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub event: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersQuery {
    pub limit: Option<u32>,
}

impl OrdersQuery {
    pub fn page_size(&self) -> Result<u32, RelayError> {
        let limit = self.limit.unwrap_or(DEFAULT_ORDER_PAGE_SIZE);
        validate_page_size(limit)?;
        Ok(limit)
    }
}

impl Validate for InboundEvent {
    fn validate(&self) -> Result<(), RelayError> {
        validate_required("event", &self.event)
    }
}

impl Validate for OrderWebhookEvent {
    fn validate(&self) -> Result<(), RelayError> {
        if let OrderId::Text(id) = &self.id {
            validate_required("id", id)?;
        }
        validate_amount("total_price", self.total_price.value())?;
        validate_currency(&self.currency)
    }
}

impl Validate for PaymentWebhookEvent {
    fn validate(&self) -> Result<(), RelayError> {
        validate_required("event", &self.event)?;
        validate_amount("amount", self.amount.value())?;
        validate_currency(&self.currency)
    }
}

impl Validate for ChatRequest {
    fn validate(&self) -> Result<(), RelayError> {
        validate_required("event", &self.event)?;
        validate_required("message", &self.message)?;
        validate_max_chars("message", &self.message, MAX_CHAT_MESSAGE_CHARS)
    }
}

impl Validate for OutboundMessage {
    fn validate(&self) -> Result<(), RelayError> {
        validate_phone_number(&self.phone_number)?;
        validate_required("message", &self.message)?;
        validate_max_chars("message", &self.message, MAX_OUTBOUND_MESSAGE_CHARS)
    }
}
