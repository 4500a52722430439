use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Shopify,
    Llm,
    WhatsApp,
    Payments,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Shopify => "shopify",
            Provider::Llm => "llm",
            Provider::WhatsApp => "whatsapp",
            Provider::Payments => "payments",
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}
