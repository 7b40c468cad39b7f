//! Shopsearch: typo-tolerant product search backed by OpenSearch
//!
//! This is the main entry point for the service.

use anyhow::Result;
use shopsearch::{
    config,
    engine::EngineClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting shopsearch v{}", shopsearch::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!("Engine endpoint: {}", settings.engine.endpoint);
    info!(
        "Product index: {}, vocab index: {}",
        settings.engine.product_index, settings.engine.vocab_index
    );

    // Connect to the engine
    let engine = EngineClient::with_settings(&settings.engine)?;
    info!("Engine client initialized");

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, engine);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
