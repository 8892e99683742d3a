//! Course card rotation

use chrono::{DateTime, Utc};

/// Rotates a current index over an ordered item list on a fixed interval.
/// Owns only the index and the interval; the items live with the screen
/// state. With one item or none there is nothing to rotate and the
/// presenter stays disarmed.
#[derive(Debug)]
pub struct CyclePresenter {
    len: usize,
    index: usize,
    interval_ms: i64,
    armed_at: Option<DateTime<Utc>>,
}

impl CyclePresenter {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            len: 0,
            index: 0,
            interval_ms: (interval_secs.max(1) * 1000) as i64,
            armed_at: None,
        }
    }

    /// Replace the underlying item list wholesale: index resets to 0 and
    /// the rotation timer is rearmed (or disarmed for len <= 1).
    pub fn set_items(&mut self, len: usize, now: DateTime<Utc>) {
        self.len = len;
        self.index = 0;
        self.armed_at = (len > 1).then_some(now);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance if the interval has elapsed since the last advance.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let Some(armed_at) = self.armed_at else {
            return;
        };
        if (now - armed_at).num_milliseconds() >= self.interval_ms {
            self.index = (self.index + 1) % self.len;
            self.armed_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_full_rotation_returns_to_start() {
        let mut cycle = CyclePresenter::new(6);
        cycle.set_items(4, t0());

        let mut now = t0();
        for step in 1..=4 {
            now += Duration::seconds(6);
            cycle.tick(now);
            assert_eq!(cycle.index(), step % 4);
        }
        assert_eq!(cycle.index(), 0);
    }

    #[test]
    fn test_single_item_never_rotates() {
        let mut cycle = CyclePresenter::new(6);
        cycle.set_items(1, t0());

        for minute in 1..10 {
            cycle.tick(t0() + Duration::minutes(minute));
            assert_eq!(cycle.index(), 0);
        }
    }

    #[test]
    fn test_no_advance_before_interval() {
        let mut cycle = CyclePresenter::new(6);
        cycle.set_items(3, t0());

        cycle.tick(t0() + Duration::seconds(5));
        assert_eq!(cycle.index(), 0);
        cycle.tick(t0() + Duration::seconds(6));
        assert_eq!(cycle.index(), 1);
    }

    #[test]
    fn test_replacement_resets_index() {
        let mut cycle = CyclePresenter::new(6);
        cycle.set_items(3, t0());
        cycle.tick(t0() + Duration::seconds(6));
        assert_eq!(cycle.index(), 1);

        cycle.set_items(5, t0() + Duration::seconds(7));
        assert_eq!(cycle.index(), 0);
        // timer rearmed from the replacement instant
        cycle.tick(t0() + Duration::seconds(12));
        assert_eq!(cycle.index(), 0);
        cycle.tick(t0() + Duration::seconds(13));
        assert_eq!(cycle.index(), 1);
    }
}
