//! Jackpot Kiosk - A state-managed server for an unattended promotional display
//!
//! This is the main entry point for the jackpot-kiosk application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use jackpot_kiosk::{
    api::create_router,
    config::Config,
    engine::{Clock, SystemClock},
    state::AppState,
    tasks::{kiosk_resilience_task, screen_ticker_task, wake_hold_task},
    utils::{reload_on_sighup, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "jackpot_kiosk={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting jackpot-kiosk server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms, reload={}min",
        config.host, config.port, config.tick_millis, config.reload_minutes
    );

    // Create application state
    let state = AppState::new(&config);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Start the display loop and the kiosk maintenance tasks
    let ticker_state = Arc::clone(&state);
    let ticker_clock = Arc::clone(&clock);
    tokio::spawn(async move {
        screen_ticker_task(ticker_state, ticker_clock).await;
    });

    let resilience_state = Arc::clone(&state);
    let resilience_clock = Arc::clone(&clock);
    tokio::spawn(async move {
        kiosk_resilience_task(resilience_state, resilience_clock).await;
    });

    tokio::spawn(wake_hold_task());
    tokio::spawn(reload_on_sighup(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /screen  - Current display frame");
    info!("  POST /chat    - Course advisor chat");
    info!("  GET  /health  - Health check");
    info!("  /admin/*      - Campaign/theme/gift/background back office");

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
