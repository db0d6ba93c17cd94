use mockcode_api::{setup, telemetry};
use mockcode_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry(config.log_json)?;
    tracing::info!(environment = %config.environment, "Configuration loaded");

    // Initialize the application (storage, inference client, routes)
    let router = setup::initialize_app(&config).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
