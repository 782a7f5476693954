use anyhow::Context;
use tracing_subscriber::EnvFilter;
use user_api_core::ApiClient;
use user_api_demo::{run_scenario, Config, Scenario};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    // One session for the whole run; its connections are released when it drops.
    let session = reqwest::Client::new();
    let client = ApiClient::with_host(session, &config.host, &config.port)
        .with_context(|| format!("invalid API address {}:{}", config.host, config.port))?;

    let report = run_scenario(&client, &Scenario::default()).await?;
    tracing::info!(user_id = %report.user_id, "scenario complete");
    Ok(())
}
