//! Jackpot Kiosk - A state-managed server for an unattended promotional display
//!
//! This library drives a TV/kiosk offer screen: a countdown against the
//! active campaign window, rotating course cards, gift popup overlays, and
//! the resilience loop that keeps an unattended display healthy. A small
//! admin API configures campaigns, themes, gifts and backgrounds.

pub mod api;
pub mod config;
pub mod engine;
pub mod services;
pub mod state;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
