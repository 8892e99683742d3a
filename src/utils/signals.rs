//! Signal handling for graceful shutdown and operator-forced reloads

use std::sync::Arc;

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

use crate::state::{AppState, ReloadReason};

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .expect("Failed to create signal handler");

    while let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
        break;
    }
}

/// Force a full screen reload whenever SIGHUP arrives, so an operator at the
/// kiosk box can kick the display without restarting the service.
pub async fn reload_on_sighup(state: Arc<AppState>) {
    let mut signals =
        Signals::new([signal_hook::consts::SIGHUP]).expect("Failed to create SIGHUP handler");

    while let Some(signal) = signals.next().await {
        info!("Received signal: {}, forcing screen reload", signal);
        state.request_reload(ReloadReason::Signal);
    }
}
