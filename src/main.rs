//! Payroll service binary.
//!
//! Loads the service configuration named by `PAYROLL_CONFIG` (default
//! `config/payroll.yaml`), seeds the in-memory store and serves the HTTP API.

use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        env::var("PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = ConfigLoader::load(&config_path)?;
    let listen_addr = loader.config().server.listen_addr.clone();
    info!(
        config_path = %config_path,
        seed_path = ?loader.seed_path(),
        "Configuration loaded"
    );

    let state = AppState::from_config(loader)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&listen_addr).await?;
    info!(listen_addr = %listen_addr, "Payroll service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
