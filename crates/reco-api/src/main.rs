//! API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p reco-api
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! picked up when present).

use reco_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first: the environment decides the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = try_init_tracing(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.server.port,
        "Configuration loaded"
    );

    // Run the server
    if let Err(e) = reco_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
