//! State management module

pub mod app_state;
pub mod screen_state;

// Re-export main types
pub use app_state::{AppState, KioskSettings, ReloadReason};
pub use screen_state::{PopupView, ScreenSnapshot, ScreenState};
