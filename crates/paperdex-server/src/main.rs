//! Paperdex Server Binary

use std::sync::Arc;

use paperdex_core::ServiceConfig;
use paperdex_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env();
    let state = Arc::new(AppState::from_config(&config)?);

    serve(&config.bind_addr, state).await
}
