//! Wall-clock abstraction

use chrono::{DateTime, Utc};

/// Source of the current instant. Engines never read the clock themselves;
/// the caller passes `now` in, which keeps every state transition a pure
/// function of (now, configuration) and lets tests drive time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
