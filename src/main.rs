use anyhow::Result;
use std::sync::Arc;
use sheet_insights::{build_router, config, logging, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;
    let addr = config.socket_addr();

    // Build our application state
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
