//! lineircd - line-oriented IRC-style chat daemon.

use lineircd::config::{Config, LogConfig};
use lineircd::network::Gateway;
use lineircd::state::Registry;
use lineircd::telemetry;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing(&LogConfig::default());
            error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    telemetry::init_tracing(&config.log);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        network = %config.server.network,
        sid = %config.server.sid,
        version = %config.server.version,
        "Starting lineircd"
    );

    let registry = Arc::new(Registry::new(&config));
    let gateway = Gateway::bind(config.listen.address, Arc::clone(&registry)).await?;

    tokio::select! {
        result = gateway.run() => {
            if let Err(e) = result {
                error!(error = %e, "Gateway error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(
                sessions = registry.session_count(),
                channels = registry.channel_count(),
                "Received shutdown signal"
            );
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
