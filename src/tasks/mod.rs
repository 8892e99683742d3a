//! Background tasks module
//!
//! Long-running tasks spawned alongside the HTTP server: the display ticker,
//! the kiosk resilience loop, and the wake-lock holder.

pub mod kiosk_resilience;
pub mod screen_ticker;
pub mod wake_hold;

// Re-export main functions
pub use kiosk_resilience::kiosk_resilience_task;
pub use screen_ticker::screen_ticker_task;
pub use wake_hold::wake_hold_task;
