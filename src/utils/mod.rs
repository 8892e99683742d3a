//! Utility functions module

pub mod signals;
pub mod text;

// Re-export main functions
pub use signals::{reload_on_sighup, shutdown_signal};
pub use text::strip_html;
