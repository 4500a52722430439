use anyhow::Result;
use relay_service::models::{
    events::{Amount, OrdersQuery},
    response::ErrorBody,
    validation::{validate_currency, validate_phone_number},
};
use serde_json::{Number, json};
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::any};

use crate::common::{TestApp, config_for, spawn_app};

/// Starts the app against a provider mock that must never be called.
async fn app_without_upstream_calls() -> Result<(MockServer, TestApp)> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = spawn_app(config_for(&server)?).await?;

    Ok((server, app))
}

async fn assert_rejected(app: &TestApp, path: &str, payload: serde_json::Value) -> Result<String> {
    let response = app.client.post(app.url(path)).json(&payload).send().await?;

    assert_eq!(response.status(), 400, "Expected 400 for {} {}", path, payload);

    let body: ErrorBody = response.json().await?;
    assert!(!body.error.is_empty());

    Ok(body.error)
}

/// Test: Invalid outbound messages never reach the messaging provider
#[tokio::test]
async fn test_send_rejects_invalid_phone_numbers() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    let error = assert_rejected(
        &app,
        "/send",
        json!({ "phoneNumber": "call-me", "message": "Hi" }),
    )
    .await?;
    assert!(error.contains("phoneNumber"));

    assert_rejected(&app, "/send", json!({ "phoneNumber": "+12", "message": "Hi" })).await?;
    assert_rejected(&app, "/send", json!({ "phoneNumber": "+1555", "message": "   " })).await?;
    assert_rejected(&app, "/send", json!({ "message": "Hi" })).await?;

    Ok(())
}

/// Test: Chat requests need both an event label and a message
#[tokio::test]
async fn test_chat_rejects_incomplete_requests() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    assert_rejected(&app, "/chat", json!({ "event": "greeting" })).await?;
    assert_rejected(&app, "/chat", json!({ "event": "", "message": "Hello" })).await?;

    let error = assert_rejected(
        &app,
        "/chat",
        json!({ "event": "greeting", "message": "x".repeat(4001) }),
    )
    .await?;
    assert!(error.contains("too long"));

    Ok(())
}

/// Test: Webhook payloads with bad amounts or currencies are rejected
#[tokio::test]
async fn test_webhooks_reject_malformed_money() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    assert_rejected(
        &app,
        "/webhook/payment",
        json!({ "event": "charge.succeeded", "amount": -5, "currency": "USD" }),
    )
    .await?;
    assert_rejected(
        &app,
        "/webhook/payment",
        json!({ "event": "charge.succeeded", "amount": "ten", "currency": "USD" }),
    )
    .await?;
    assert_rejected(
        &app,
        "/webhook/order",
        json!({ "id": 1001, "total_price": "19.99", "currency": "dollars" }),
    )
    .await?;
    assert_rejected(&app, "/webhook", json!({ "payload": "no event" })).await?;

    Ok(())
}

/// Test: Bodies that are not JSON get the same error shape
#[tokio::test]
async fn test_malformed_json_is_a_validation_error() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    let response = app
        .client
        .post(app.url("/chat"))
        .header("content-type", "application/json")
        .body("{ invalid json }")
        .send()
        .await?;

    assert_eq!(response.status(), 400);

    let body: ErrorBody = response.json().await?;
    assert!(!body.error.is_empty());

    Ok(())
}

/// Test: Order page sizes outside 1..=250 are rejected before calling the provider
#[tokio::test]
async fn test_orders_rejects_out_of_range_limit() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    for query in ["limit=0", "limit=251", "limit=ten"] {
        let response = app
            .client
            .get(app.url(&format!("/orders?{}", query)))
            .send()
            .await?;

        assert_eq!(response.status(), 400, "Expected 400 for {}", query);
    }

    Ok(())
}

/// Test: Boundary helpers accept the documented formats
#[test]
fn test_boundary_helpers() {
    assert!(validate_phone_number("+1555").is_ok());
    assert!(validate_phone_number("4915112345678").is_ok());
    assert!(validate_phone_number("+1234567890123456").is_err());
    assert!(validate_phone_number("+1 555 0100").is_err());

    assert!(validate_currency("usd").is_ok());
    assert!(validate_currency("EUR").is_ok());
    assert!(validate_currency("EU").is_err());
    assert!(validate_currency("E1R").is_err());

    assert_eq!(Amount::Text("19.99".to_string()).value(), Some(19.99));
    assert_eq!(Amount::Number(Number::from(42)).value(), Some(42.0));
    assert_eq!(Amount::Text("abc".to_string()).value(), None);

    assert_eq!(OrdersQuery { limit: None }.page_size().ok(), Some(10));
    assert_eq!(OrdersQuery { limit: Some(250) }.page_size().ok(), Some(250));
    assert!(OrdersQuery { limit: Some(0) }.page_size().is_err());
}

/// Test: Request-time errors map to client or upstream failures only
#[test]
fn test_error_status_mapping() {
    use relay_service::{
        errors::{RelayError, UpstreamFailure},
        models::provider::Provider,
    };

    assert_eq!(RelayError::validation("bad").status_code(), 400);

    for failure in [
        UpstreamFailure::Status(401),
        UpstreamFailure::Timeout("deadline".to_string()),
        UpstreamFailure::Transport("refused".to_string()),
        UpstreamFailure::Decode("eof".to_string()),
    ] {
        assert_eq!(
            RelayError::upstream(Provider::Llm, failure).status_code(),
            500
        );
    }

    let timed_out = RelayError::upstream(
        Provider::WhatsApp,
        UpstreamFailure::Timeout("operation timed out".to_string()),
    );
    assert_eq!(timed_out.to_string(), "whatsapp timed out");
}

/// Test: An order hook without the Shopify order id is rejected on the dashboard path
#[tokio::test]
async fn test_order_webhook_requires_shopify_shape() -> Result<()> {
    let (_server, app) = app_without_upstream_calls().await?;

    let error = assert_rejected(
        &app,
        "/api/shopify/webhook/order",
        json!({ "event": "shopify_order", "order_id": "12345" }),
    )
    .await?;
    assert!(error.contains("id"));

    Ok(())
}
