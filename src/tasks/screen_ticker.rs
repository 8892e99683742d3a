//! Display ticker background task

use std::{sync::Arc, time::Duration};

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info};

use crate::{
    engine::Clock,
    state::{AppState, ScreenState},
};

/// The display loop: steps every engine once per tick and publishes the
/// resulting frame. Reload requests rebuild the whole screen state from the
/// store; per-screen state never survives a reload.
pub async fn screen_ticker_task(state: Arc<AppState>, clock: Arc<dyn Clock>) {
    info!(
        "Starting screen ticker task ({}ms tick)",
        state.settings.tick_millis
    );

    let track_millis = state.settings.tick_millis < 1000;
    let mut reload_rx = state.reload_tx.subscribe();
    let mut screen = ScreenState::load(&state.store, clock.now(), track_millis);

    let mut ticker = tokio::time::interval(Duration::from_millis(state.settings.tick_millis));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = screen.tick(clock.now());
                state.publish_snapshot(snapshot);
            }

            msg = reload_rx.recv() => match msg {
                Ok(reason) => {
                    info!("Reloading screen state ({:?})", reason);
                    screen = ScreenState::load(&state.store, clock.now(), track_millis);
                    // Publish immediately so renderers do not wait a tick
                    let snapshot = screen.tick(clock.now());
                    state.publish_snapshot(snapshot);
                }
                Err(RecvError::Lagged(missed)) => {
                    // Coalesce the backlog into a single reload
                    debug!("Reload channel lagged by {}, reloading once", missed);
                    screen = ScreenState::load(&state.store, clock.now(), track_millis);
                }
                Err(RecvError::Closed) => {
                    error!("Reload channel closed, stopping screen ticker");
                    break;
                }
            }
        }
    }
}
