use anyhow::Result;
use relay_service::{api::build_router, config::Config};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const PHONE_NUMBER_ID: &str = "1234567890";
pub const SHOPIFY_API_KEY: &str = "test-shopify-key";
pub const SHOPIFY_API_SECRET: &str = "test-shopify-secret";
pub const WHATSAPP_TOKEN: &str = "test-whatsapp-token";
pub const XAI_API_KEY: &str = "test-xai-key";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub fn credential_vars() -> Vec<(String, String)> {
    vars(&[
        ("SHOPIFY_API_KEY", SHOPIFY_API_KEY),
        ("SHOPIFY_API_SECRET", SHOPIFY_API_SECRET),
        ("WHATSAPP_TOKEN", WHATSAPP_TOKEN),
        ("XAI_API_KEY", XAI_API_KEY),
        ("STRIPE_SECRET_KEY", "sk_test_123"),
    ])
}

/// Required settings plus every credential, with providers pointed at `base_url`.
pub fn provider_vars(base_url: &str) -> Vec<(String, String)> {
    let mut all = vars(&[
        ("SHOPIFY_STORE_URL", base_url),
        ("WHATSAPP_PHONE_NUMBER_ID", PHONE_NUMBER_ID),
        ("WHATSAPP_API_BASE_URL", format!("{}/v17.0", base_url).as_str()),
        ("LLM_API_URL", format!("{}/v1/chat", base_url).as_str()),
        ("LOG_FORMAT", "compact"),
    ]);
    all.extend(credential_vars());
    all
}

pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn config_for(server: &MockServer) -> Result<Config> {
    Ok(Config::from_vars(provider_vars(&server.uri()))?)
}

/// Like [`config_for`], with extra settings layered on top.
pub fn config_with(server: &MockServer, overrides: &[(&str, &str)]) -> Result<Config> {
    let mut all = provider_vars(&server.uri());
    all.retain(|(k, _)| !overrides.iter().any(|(key, _)| key == k));
    all.extend(vars(overrides));

    Ok(Config::from_vars(all)?)
}

pub async fn spawn_app(config: Config) -> Result<TestApp> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = format!("http://{}", listener.local_addr()?);
    let app = build_router(config)?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestApp {
        address,
        client: reqwest::Client::new(),
    })
}

/// A local port with nothing listening on it.
pub fn closed_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
