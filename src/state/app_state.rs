//! Shared application state

use std::{sync::Arc, time::Instant};

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::warn;

use super::ScreenSnapshot;
use crate::{
    config::Config,
    services::ChatRelay,
    store::{MediaStore, RecordStore},
};

/// Why a full screen reload was requested. Carried on the reload channel so
/// the ticker can log what kicked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    /// Periodic hard refresh against long-session staleness.
    Scheduled,
    /// An upcoming campaign just crossed its start instant.
    StartBoundary,
    /// An admin asked for it over the API.
    Admin,
    /// SIGHUP from an operator on the box.
    Signal,
}

/// Runtime settings derived from the CLI configuration.
#[derive(Debug, Clone)]
pub struct KioskSettings {
    pub tick_millis: u64,
    /// Fallback hard-refresh interval when the theme does not set one.
    pub reload_minutes: u64,
    pub admin_token: Option<String>,
}

/// Everything the handlers and background tasks share: the stores, the
/// latest published frame, and the reload event channel.
pub struct AppState {
    pub store: RecordStore,
    pub media: MediaStore,
    pub chat: ChatRelay,
    pub settings: KioskSettings,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Latest frame for `GET /screen`
    pub snapshot_tx: watch::Sender<ScreenSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<ScreenSnapshot>,
    /// Reload requests fan out to the ticker from here
    pub reload_tx: broadcast::Sender<ReloadReason>,
}

impl AppState {
    pub fn new(config: &Config) -> Arc<Self> {
        let (snapshot_tx, snapshot_rx) = watch::channel(ScreenSnapshot::empty(Utc::now()));
        let (reload_tx, _) = broadcast::channel(16);

        if config.admin_token.is_none() {
            warn!("No admin token configured; /admin routes are unauthenticated");
        }

        Arc::new(Self {
            store: RecordStore::new(),
            media: MediaStore::new(),
            chat: ChatRelay::new(config.chat_endpoint.clone(), config.chat_model.clone()),
            settings: KioskSettings {
                tick_millis: config.tick_millis,
                reload_minutes: config.reload_minutes,
                admin_token: config.admin_token.clone(),
            },
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            reload_tx,
        })
    }

    /// Ask the ticker for a full screen reload. Dropped silently (logged)
    /// when the ticker is gone, which only happens during shutdown.
    pub fn request_reload(&self, reason: ReloadReason) {
        if let Err(e) = self.reload_tx.send(reason) {
            warn!("No screen task listening for reload ({:?}): {}", reason, e);
        }
    }

    pub fn publish_snapshot(&self, snapshot: ScreenSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
    }

    pub fn latest_snapshot(&self) -> ScreenSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
