use std::{collections::HashMap, sync::Arc};

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, Method, header},
    response::Json,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    clients::{
        build_http_client, llm::LlmClient, shopify::ShopifyClient, whatsapp::WhatsAppClient,
    },
    config::Config,
    errors::{ConfigError, RelayError},
    health::HealthChecker,
    models::{
        events::{
            ChatRequest, InboundEvent, OrderWebhookEvent, OrdersQuery, OutboundMessage,
            PaymentWebhookEvent,
        },
        health::HealthCheckResponse,
        provider::Provider,
        response::{Ack, ChatReply, OrderList, SendResult},
        validation::Validate,
    },
    webhooks,
};

pub struct AppState {
    service_name: String,
    shopify: ShopifyClient,
    llm: LlmClient,
    whatsapp: WhatsAppClient,
    health_checker: HealthChecker,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let http_client = build_http_client(&config)?;

        let shopify = ShopifyClient::new(&config, http_client.clone())?;
        let llm = LlmClient::new(&config, http_client.clone());
        let whatsapp = WhatsAppClient::new(&config, http_client)?;

        let endpoints = HashMap::from([
            (Provider::Shopify, shopify.orders_url().to_string()),
            (Provider::Llm, llm.endpoint().to_string()),
            (Provider::WhatsApp, whatsapp.messages_url().to_string()),
        ]);

        Ok(Self {
            service_name: config.service_name.clone(),
            shopify,
            llm,
            whatsapp,
            health_checker: HealthChecker::new(config, endpoints),
        })
    }
}

pub fn build_router(config: Config) -> Result<Router, ConfigError> {
    let cors = cors_layer(&config.cors_allowed_origin)?;
    let state = Arc::new(AppState::new(config)?);

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/webhook", post(receive_webhook))
        .route("/webhook/payment", post(receive_payment_webhook))
        .route("/webhook/order", post(receive_order_webhook))
        .route("/orders", get(list_orders))
        .route("/chat", post(chat))
        .route("/send", post(send_message))
        .nest("/api", dashboard_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

/// The same handlers under the prefixes the dashboard panels call.
fn dashboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/webhook/payment", post(receive_payment_webhook))
        .route("/shopify/orders", get(list_orders))
        .route("/shopify/webhook/order", post(receive_order_webhook))
        .route("/llm/chat", post(chat))
        .route("/whatsapp/send", post(send_message))
}

fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidValue {
        name: "CORS_ALLOWED_ORIGIN",
        value: origin.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    for name in config.credentials.placeholders() {
        warn!(
            credential = name.env_var(),
            placeholder = name.placeholder(),
            "Credential not set, using placeholder value"
        );
    }

    let addr = config.bind_address();
    let app = build_router(config)?;
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Relay server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RelayError> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(request)
}

async fn root(State(state): State<Arc<AppState>>) -> Json<Ack> {
    Json(Ack::new(format!("{} running", state.service_name)))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(state.health_checker.check_all())
}

async fn receive_webhook(
    payload: Result<Json<InboundEvent>, JsonRejection>,
) -> Result<Json<Ack>, RelayError> {
    let event = validated(payload)?;

    Ok(Json(webhooks::receive_event(&event)))
}

async fn receive_payment_webhook(
    payload: Result<Json<PaymentWebhookEvent>, JsonRejection>,
) -> Result<Json<Ack>, RelayError> {
    let payment = validated(payload)?;

    Ok(Json(webhooks::receive_payment_webhook(&payment)))
}

async fn receive_order_webhook(
    payload: Result<Json<OrderWebhookEvent>, JsonRejection>,
) -> Result<Json<Ack>, RelayError> {
    let order = validated(payload)?;

    Ok(Json(webhooks::receive_order_webhook(&order)))
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> Result<Json<OrderList>, RelayError> {
    let Query(query) = query?;
    let limit = query.page_size()?;

    Ok(Json(state.shopify.list_orders(limit).await?))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, RelayError> {
    let request = validated(payload)?;

    Ok(Json(state.llm.chat(&request.event, &request.message).await?))
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OutboundMessage>, JsonRejection>,
) -> Result<Json<SendResult>, RelayError> {
    let request = validated(payload)?;

    Ok(Json(
        state
            .whatsapp
            .send(&request.phone_number, &request.message)
            .await?,
    ))
}
