//! Study Bell - A state-managed HTTP server driving a Pomodoro study timer
//!
//! This is the main entry point for the study-bell application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_bell::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::phase_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_bell={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-bell server v1.0.0");
    info!(
        "Configuration: host={}, port={}, study={}min, short break={}min, long break={}min, cycles={}",
        config.host, config.port, config.study, config.short_break, config.long_break, config.cycles
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_config(),
    ));

    // Start the phase ticker background task; subscribe before spawning so
    // the first command cannot slip past it
    let control_rx = state.control_tx.subscribe();
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        phase_ticker_task(ticker_state, control_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start   - Start the study countdown");
    info!("  POST /pause   - Pause the countdown");
    info!("  POST /resume  - Resume a paused countdown");
    info!("  POST /stop    - Stop and reset the timer");
    info!("  PUT  /config  - Update durations and cycle count");
    info!("  GET  /status  - Current timer state and progress");
    info!("  GET  /health  - Health check");
    info!("  GET  /about   - App info and contact link");

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
