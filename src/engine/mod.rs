//! Display timing engines
//!
//! Pure, clock-parameterised state machines that drive the kiosk screen.
//! Nothing in here performs I/O or arms timers; the ticker task feeds every
//! engine the current instant and publishes the result.

pub mod clock;
pub mod countdown;
pub mod cycle;
pub mod popup;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use countdown::{CountdownEngine, CountdownStatus, CountdownTick, RemainderFields, TimeWindow};
pub use cycle::CyclePresenter;
pub use popup::{PopupPhase, PopupSequencer, PopupTimings};
