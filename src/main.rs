//! Agrolink server — marketplace backend for verified farmers and
//! artisans.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use agrolink_core::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let env = std::env::var("AGROLINK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;

    init_logging(&config);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
}

/// Initialize tracing/logging from configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Connect, migrate, wire state, and serve.
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Agrolink v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = agrolink_database::connection::create_pool(&config.database).await?;
    agrolink_database::migration::run_migrations(&db_pool).await?;

    let state = agrolink_api::AppState::build(Arc::new(config), db_pool).await?;

    agrolink_api::serve(state).await?;

    tracing::info!("Agrolink stopped");
    Ok(())
}
