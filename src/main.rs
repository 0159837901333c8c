use std::sync::Arc;

use anyhow::Result;
use tempodash::client::TempoClient;
use tempodash::config::Config;
use tempodash::dashboard::Dashboard;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tempodash.yaml".to_string());
    let config = Config::load_or_default(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    tempodash::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Tempodash {} starting up, upstream {}",
        env!("APP_VERSION"),
        config.upstream.base_url
    );

    let client = TempoClient::new(&config.upstream)
        .map_err(|e| anyhow::anyhow!("Failed to create upstream client: {}", e))?;
    let dashboard = Arc::new(Dashboard::new(Arc::new(client)));

    tempodash::web::serve(dashboard, &config.web.host, config.web.port)
        .await
        .map_err(|e| anyhow::anyhow!("Web server error: {}", e))
}
