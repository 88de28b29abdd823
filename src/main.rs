//! Scrum Timer - A state-managed HTTP server for daily scrum meetings
//! 
//! This is the main entry point for the scrum-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use scrum_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("scrum_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting scrum-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create application state
    let scrums = config.scrum_store();
    info!("Loaded {} scrums", scrums.len());
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.tick_interval(),
        scrums,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /scrums             - List scrum cards");
    info!("  POST   /scrums             - Create a scrum from a draft");
    info!("  GET    /scrums/:id         - Get a scrum");
    info!("  PUT    /scrums/:id         - Save an edited draft");
    info!("  DELETE /scrums/:id         - Delete a scrum");
    info!("  GET    /scrums/:id/draft   - Edit buffer for a scrum");
    info!("  POST   /scrums/:id/meeting - Start a meeting");
    info!("  GET    /meeting            - Current meeting view");
    info!("  POST   /meeting/next       - Next speaker");
    info!("  POST   /meeting/cancel     - Cancel the meeting");
    info!("  GET    /status             - Server status");
    info!("  GET    /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
