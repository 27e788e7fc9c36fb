//! Tracking service binary for the EON living platform.
//!
//! Loads configuration, opens the platform store, makes sure the
//! singleton state row exists, and serves the HTTP API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `eon-config.yaml` (or `EON_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured store (running migrations for `PostgreSQL`)
//! 4. Create the platform state row if it is missing
//! 5. Serve the API

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use eon_api::{AppState, ServerConfig};
use eon_core::EonConfig;
use eon_core::config::{LogFormat, LoggingSettings};
use eon_db::PlatformStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "eon-config.yaml";

/// Application entry point for the tracking service.
///
/// # Errors
///
/// Returns an error if any startup step fails or the server stops with
/// a fatal error.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration.
    let config_path = std::env::var_os("EON_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config_found = config_path.exists();
    let config = EonConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;

    if !config_found {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        path = %config_path.display(),
        found = config_found,
        backend = ?config.store.backend,
        strategy = ?config.store.update_strategy,
        curve = ?config.growth,
        "Configuration loaded"
    );

    // 3. Open the store.
    let store = PlatformStore::open(&config.store).await?;
    info!(backend = store.name(), "Store opened");

    // 4. Initialize the platform state.
    let platform = store.ensure_initialized(&config.platform.version).await?;
    info!(
        version = %platform.version,
        total = platform.total_interactions,
        growth = platform.growth_level.value(),
        "Platform state ready"
    );

    // 5. Serve.
    let state = Arc::new(AppState::from_config(store.clone(), &config));
    let server_config = ServerConfig::from(&config.server);
    eon_api::start_server(&server_config, state).await?;

    if let PlatformStore::Postgres(pg) = &store {
        pg.close().await;
    }
    info!("eon-server shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` overrides `logging.level`.
fn init_logging(settings: &LoggingSettings) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ServerError::Logging {
            message: format!("invalid log filter {:?}: {e}", settings.level),
        })?;

    let result = match settings.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };
    result.map_err(|e| ServerError::Logging {
        message: e.to_string(),
    })
}
