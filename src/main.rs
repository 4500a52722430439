use anyhow::{Error, Result};
use relay_service::{api::run_api_server, config::Config, logging::init_tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    init_tracing(config.log_format);

    run_api_server(config).await
}
