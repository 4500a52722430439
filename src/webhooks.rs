//! Webhook receivers. They only acknowledge and log: nothing is stored, so
//! identical deliveries produce identical acknowledgements.

use tracing::info;
use uuid::Uuid;

use crate::models::{
    events::{InboundEvent, OrderWebhookEvent, PaymentWebhookEvent},
    response::Ack,
};

pub fn receive_event(event: &InboundEvent) -> Ack {
    let receipt_id = Uuid::new_v4();

    info!(
        receipt_id = %receipt_id,
        event = %event.event,
        payload = %serde_json::Value::Object(event.extra.clone()),
        "Received webhook"
    );

    Ack::new(format!("webhook received: {}", event.event))
}

pub fn receive_order_webhook(order: &OrderWebhookEvent) -> Ack {
    let receipt_id = Uuid::new_v4();

    info!(
        receipt_id = %receipt_id,
        order_id = %order.id,
        total_price = %order.total_price,
        currency = %order.currency,
        "Received Shopify order webhook"
    );

    Ack::new(format!("order webhook received: {}", order.id))
}

pub fn receive_payment_webhook(payment: &PaymentWebhookEvent) -> Ack {
    let receipt_id = Uuid::new_v4();

    info!(
        receipt_id = %receipt_id,
        event = %payment.event,
        amount = %payment.amount,
        currency = %payment.currency,
        "Received payment webhook"
    );

    Ack::new(format!(
        "payment webhook received: {}, amount: {} {}",
        payment.event, payment.amount, payment.currency
    ))
}
