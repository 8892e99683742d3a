//! External collaborators
//!
//! The only remote dependency the kiosk has: the course-advisor chat model.

pub mod chat;

// Re-export main types
pub use chat::ChatRelay;
