use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WhatsAppTextMessage {
    pub messaging_product: &'static str,
    pub to: String,

    #[serde(rename = "type")]
    pub message_type: &'static str,

    pub text: WhatsAppText,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatsAppText {
    pub body: String,
}

impl WhatsAppTextMessage {
    pub fn new(to: &str, body: &str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.to_string(),
            message_type: "text",
            text: WhatsAppText {
                body: body.to_string(),
            },
        }
    }
}
