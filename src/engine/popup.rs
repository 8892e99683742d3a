//! Transient gift overlay sequencer
//!
//! The original display drove its overlays with chains of nested one-shot
//! timers, which could leave orphaned timers firing against a replaced item
//! list. This sequencer is a single phase machine advanced by the recurring
//! screen tick instead: replacing the items resets the machine, so there is
//! never a pending timer to invalidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the overlay. Strictly sequential and cyclic:
/// hidden -> showing -> scratching -> revealed -> hidden -> next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupPhase {
    Hidden,
    Showing,
    Scratching,
    Revealed,
}

/// Phase durations in milliseconds. A zero duration makes the phase last a
/// single tick rather than being skipped.
#[derive(Debug, Clone, Copy)]
pub struct PopupTimings {
    /// Delay before the very first appearance.
    pub initial_delay_ms: u64,
    /// Entry animation before the scratch starts.
    pub show_ms: u64,
    /// Scratch/appear animation.
    pub scratch_ms: u64,
    /// How long the revealed item stays on screen.
    pub reveal_ms: u64,
    /// Gap between hiding one item and showing the next.
    pub between_ms: u64,
}

impl PopupTimings {
    /// Full-screen scratch card: appears every 15 s, scratches for 2 s,
    /// holds the reveal for 4 s.
    pub fn scratch_card() -> Self {
        Self {
            initial_delay_ms: 5_000,
            show_ms: 500,
            scratch_ms: 2_000,
            reveal_ms: 4_000,
            between_ms: 15_000,
        }
    }

    /// Corner gift banner: slides in 2 s after load, stays for 5 s, waits
    /// 3 s before the next gift.
    pub fn corner_banner() -> Self {
        Self {
            initial_delay_ms: 2_000,
            show_ms: 0,
            scratch_ms: 0,
            reveal_ms: 5_000,
            between_ms: 3_000,
        }
    }
}

/// Round-robin overlay driver. A screen may run several of these with
/// different timings; each owns its whole phase state and shares nothing.
#[derive(Debug)]
pub struct PopupSequencer {
    timings: PopupTimings,
    item_count: usize,
    index: usize,
    phase: PopupPhase,
    phase_since: Option<DateTime<Utc>>,
    shown_once: bool,
}

impl PopupSequencer {
    pub fn new(timings: PopupTimings) -> Self {
        Self {
            timings,
            item_count: 0,
            index: 0,
            phase: PopupPhase::Hidden,
            phase_since: None,
            shown_once: false,
        }
    }

    /// Replace the candidate item list. The whole cycle restarts from the
    /// initial delay; no phase state survives the replacement.
    pub fn set_items(&mut self, count: usize, now: DateTime<Utc>) {
        self.item_count = count;
        self.index = 0;
        self.phase = PopupPhase::Hidden;
        self.phase_since = (count > 0).then_some(now);
        self.shown_once = false;
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    /// Index of the item currently on screen, if any.
    pub fn current(&self) -> Option<usize> {
        (self.phase != PopupPhase::Hidden && self.item_count > 0).then_some(self.index)
    }

    /// Advance at most one phase if its duration has elapsed. Returns the
    /// phase in effect after the step.
    pub fn step(&mut self, now: DateTime<Utc>) -> PopupPhase {
        let Some(since) = self.phase_since else {
            return self.phase;
        };
        let elapsed = (now - since).num_milliseconds();

        let due = |ms: u64| elapsed >= ms as i64;

        match self.phase {
            PopupPhase::Hidden => {
                let wait = if self.shown_once {
                    self.timings.between_ms
                } else {
                    self.timings.initial_delay_ms
                };
                if due(wait) {
                    if self.shown_once {
                        self.index = (self.index + 1) % self.item_count;
                    }
                    self.shown_once = true;
                    self.transition(PopupPhase::Showing, now);
                }
            }
            PopupPhase::Showing => {
                if due(self.timings.show_ms) {
                    self.transition(PopupPhase::Scratching, now);
                }
            }
            PopupPhase::Scratching => {
                if due(self.timings.scratch_ms) {
                    self.transition(PopupPhase::Revealed, now);
                }
            }
            PopupPhase::Revealed => {
                if due(self.timings.reveal_ms) {
                    self.transition(PopupPhase::Hidden, now);
                }
            }
        }
        self.phase
    }

    fn transition(&mut self, phase: PopupPhase, now: DateTime<Utc>) {
        self.phase = phase;
        self.phase_since = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    /// Drive the sequencer at a fixed tick rate, collecting phase
    /// transitions with the item shown at each one.
    fn run(
        seq: &mut PopupSequencer,
        from: DateTime<Utc>,
        ticks: usize,
        tick_ms: i64,
    ) -> Vec<(PopupPhase, Option<usize>)> {
        let mut transitions = Vec::new();
        let mut last = seq.phase();
        for i in 1..=ticks {
            let phase = seq.step(from + Duration::milliseconds(tick_ms * i as i64));
            if phase != last {
                transitions.push((phase, seq.current()));
                last = phase;
            }
        }
        transitions
    }

    #[test]
    fn test_phase_order_over_three_items() {
        let mut seq = PopupSequencer::new(PopupTimings::scratch_card());
        seq.set_items(3, t0());

        // Three full cycles at 10 Hz; one cycle is ~26.5s
        let transitions = run(&mut seq, t0(), 900, 100);

        let expected_order = [
            PopupPhase::Showing,
            PopupPhase::Scratching,
            PopupPhase::Revealed,
            PopupPhase::Hidden,
        ];
        assert!(transitions.len() >= 12);
        for (i, (phase, item)) in transitions.iter().take(12).enumerate() {
            assert_eq!(*phase, expected_order[i % 4], "transition {}", i);
            // Items advance round-robin, one per cycle
            match phase {
                PopupPhase::Hidden => assert_eq!(*item, None),
                _ => assert_eq!(*item, Some((i / 4) % 3)),
            }
        }
    }

    #[test]
    fn test_no_items_never_fires() {
        let mut seq = PopupSequencer::new(PopupTimings::corner_banner());
        seq.set_items(0, t0());
        for minute in 0..10 {
            assert_eq!(seq.step(t0() + Duration::minutes(minute)), PopupPhase::Hidden);
            assert_eq!(seq.current(), None);
        }
    }

    #[test]
    fn test_zero_duration_phases_last_one_tick() {
        let mut seq = PopupSequencer::new(PopupTimings::corner_banner());
        seq.set_items(2, t0());

        // 2s initial delay, then one tick per zero-duration phase
        assert_eq!(seq.step(t0() + Duration::seconds(1)), PopupPhase::Hidden);
        assert_eq!(seq.step(t0() + Duration::seconds(2)), PopupPhase::Showing);
        assert_eq!(seq.step(t0() + Duration::seconds(3)), PopupPhase::Scratching);
        assert_eq!(seq.step(t0() + Duration::seconds(4)), PopupPhase::Revealed);
    }

    #[test]
    fn test_replacement_resets_mid_cycle() {
        let mut seq = PopupSequencer::new(PopupTimings::scratch_card());
        seq.set_items(3, t0());

        // Get into the revealed phase
        run(&mut seq, t0(), 100, 100);
        assert_ne!(seq.phase(), PopupPhase::Hidden);

        // Replacing the list mid-flight restarts from the initial delay
        let replaced_at = t0() + Duration::seconds(10);
        seq.set_items(2, replaced_at);
        assert_eq!(seq.phase(), PopupPhase::Hidden);
        assert_eq!(seq.step(replaced_at + Duration::seconds(4)), PopupPhase::Hidden);
        assert_eq!(seq.step(replaced_at + Duration::seconds(5)), PopupPhase::Showing);
        assert_eq!(seq.current(), Some(0));
    }

    #[test]
    fn test_independent_sequencers_share_no_state() {
        let mut card = PopupSequencer::new(PopupTimings::scratch_card());
        let mut banner = PopupSequencer::new(PopupTimings::corner_banner());
        card.set_items(3, t0());
        banner.set_items(5, t0());

        let at = t0() + Duration::milliseconds(2_500);
        card.step(at);
        banner.step(at);
        // Banner is past its 2s initial delay, the card is not
        assert_eq!(card.phase(), PopupPhase::Hidden);
        assert_eq!(banner.phase(), PopupPhase::Showing);
    }
}
