//! Campaign countdown engine
//!
//! Classifies the current instant against a campaign time window and
//! decomposes the remaining distance into fixed-width display fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// "Ending soon" emphasis kicks in under six hours of active time left.
const ENDING_SOON_MS: i64 = 6 * MS_PER_HOUR;

/// Where the current instant sits relative to the campaign window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownStatus {
    /// No window configured; the engine does not compute anything.
    Idle,
    /// Before the start instant; counting down to the start.
    Upcoming,
    /// Inside the window; counting down to the end.
    Active,
    /// Past the end instant; display fields are frozen.
    Ended,
}

/// A campaign time window. A missing start is the degenerate "end only"
/// form: the campaign is considered already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

/// Zero-padded display fields for the remaining duration. Hours are not
/// capped at 24; a multi-day window renders as a large hour count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    /// Tens-of-milliseconds field, only tracked when the engine is built
    /// with sub-second precision enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milliseconds: Option<String>,
    pub ended: bool,
}

impl RemainderFields {
    fn zero(track_millis: bool) -> Self {
        Self {
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            milliseconds: track_millis.then(|| "00".to_string()),
            ended: false,
        }
    }

    fn from_distance(distance_ms: i64, track_millis: bool) -> Self {
        let distance = distance_ms.max(0);
        Self {
            hours: format!("{:02}", distance / MS_PER_HOUR),
            minutes: format!("{:02}", (distance % MS_PER_HOUR) / MS_PER_MINUTE),
            seconds: format!("{:02}", (distance % MS_PER_MINUTE) / MS_PER_SECOND),
            milliseconds: track_millis.then(|| format!("{:02}", (distance % MS_PER_SECOND) / 10)),
            ended: false,
        }
    }
}

/// Result of one engine tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTick {
    pub status: CountdownStatus,
    pub fields: RemainderFields,
    /// Presentation-only emphasis flag; never affects behavior.
    pub ending_soon: bool,
}

/// Derives status and remainder fields from (now, window) on every tick.
/// Holds no accumulated time; only the last rendered fields survive a tick,
/// so they can be frozen once the window ends.
#[derive(Debug)]
pub struct CountdownEngine {
    window: Option<TimeWindow>,
    track_millis: bool,
    last_fields: RemainderFields,
}

impl CountdownEngine {
    /// `track_millis` enables the tens-of-milliseconds field. Leave it off
    /// for 1 Hz kiosk ticks; it only earns its CPU cost at 10-20 Hz.
    pub fn new(track_millis: bool) -> Self {
        Self {
            window: None,
            track_millis,
            last_fields: RemainderFields::zero(track_millis),
        }
    }

    /// Replace the window. `None` parks the engine in `Idle`.
    pub fn set_window(&mut self, window: Option<TimeWindow>) {
        self.window = window;
        self.last_fields = RemainderFields::zero(self.track_millis);
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownTick {
        let Some(window) = self.window else {
            return CountdownTick {
                status: CountdownStatus::Idle,
                fields: RemainderFields::zero(self.track_millis),
                ending_soon: false,
            };
        };

        let (status, target) = classify(now, window);

        if status == CountdownStatus::Ended {
            // Freeze the last computed fields rather than rendering a
            // negative remainder.
            let mut fields = self.last_fields.clone();
            fields.ended = true;
            return CountdownTick {
                status,
                fields,
                ending_soon: false,
            };
        }

        let distance_ms = (target - now).num_milliseconds();
        let fields = RemainderFields::from_distance(distance_ms, self.track_millis);
        self.last_fields = fields.clone();

        let ending_soon = status == CountdownStatus::Active
            && (window.end - now).num_milliseconds() < ENDING_SOON_MS;

        CountdownTick {
            status,
            fields,
            ending_soon,
        }
    }
}

/// Pure classification: which state the window is in and which instant the
/// countdown targets. A misconfigured window (start after end) falls back to
/// the now-vs-end comparison alone; end is authoritative.
fn classify(now: DateTime<Utc>, window: TimeWindow) -> (CountdownStatus, DateTime<Utc>) {
    match window.start {
        Some(start) if start <= window.end => {
            if now < start {
                (CountdownStatus::Upcoming, start)
            } else if now >= window.end {
                (CountdownStatus::Ended, window.end)
            } else {
                (CountdownStatus::Active, window.end)
            }
        }
        _ => {
            if now >= window.end {
                (CountdownStatus::Ended, window.end)
            } else {
                (CountdownStatus::Active, window.end)
            }
        }
    }
}

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

/// Map ASCII digits to Bengali numerals. Non-digit characters pass through.
/// Applied to formatted strings only, never to the arithmetic.
pub fn to_bengali_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => BENGALI_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Reverse mapping, Bengali numerals back to ASCII digits.
pub fn to_latin_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            BENGALI_DIGITS
                .iter()
                .position(|&b| b == c)
                .map(|d| char::from(b'0' + d as u8))
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn window(start_offset_h: i64, end_offset_h: i64) -> TimeWindow {
        TimeWindow {
            start: Some(t0() + Duration::hours(start_offset_h)),
            end: t0() + Duration::hours(end_offset_h),
        }
    }

    #[test]
    fn test_idle_without_window() {
        let mut engine = CountdownEngine::new(false);
        let tick = engine.tick(t0());
        assert_eq!(tick.status, CountdownStatus::Idle);
        assert_eq!(tick.fields.hours, "00");
        assert!(!tick.fields.ended);
    }

    #[test]
    fn test_window_scenario() {
        // window = {start: T, end: T+2h}
        let mut engine = CountdownEngine::new(false);
        engine.set_window(Some(window(0, 2)));

        // now = T-1h: upcoming, counting down to start
        let tick = engine.tick(t0() - Duration::hours(1));
        assert_eq!(tick.status, CountdownStatus::Upcoming);
        assert_eq!(tick.fields.hours, "01");
        assert_eq!(tick.fields.minutes, "00");

        // now = T+1h: active, counting down to end
        let tick = engine.tick(t0() + Duration::hours(1));
        assert_eq!(tick.status, CountdownStatus::Active);
        assert_eq!(tick.fields.hours, "01");
        assert!(tick.ending_soon);

        // now = T+2h+1s: ended, fields frozen at the last computed values
        let tick = engine.tick(t0() + Duration::hours(2) + Duration::seconds(1));
        assert_eq!(tick.status, CountdownStatus::Ended);
        assert!(tick.fields.ended);
        assert_eq!(tick.fields.hours, "01");
        assert!(!tick.ending_soon);
    }

    #[test]
    fn test_end_only_window_is_active_until_end() {
        let mut engine = CountdownEngine::new(false);
        engine.set_window(Some(TimeWindow {
            start: None,
            end: t0() + Duration::minutes(30),
        }));

        let tick = engine.tick(t0());
        assert_eq!(tick.status, CountdownStatus::Active);
        assert_eq!(tick.fields.minutes, "30");

        let tick = engine.tick(t0() + Duration::hours(1));
        assert_eq!(tick.status, CountdownStatus::Ended);
    }

    #[test]
    fn test_status_is_monotonic_in_now() {
        let mut engine = CountdownEngine::new(false);
        engine.set_window(Some(window(0, 2)));

        let order = |s: CountdownStatus| match s {
            CountdownStatus::Idle => 0,
            CountdownStatus::Upcoming => 1,
            CountdownStatus::Active => 2,
            CountdownStatus::Ended => 3,
        };

        let mut prev = 0;
        for minute in -120..300 {
            let tick = engine.tick(t0() + Duration::minutes(minute));
            let rank = order(tick.status);
            assert!(rank >= prev, "status regressed at minute {}", minute);
            prev = rank;
        }
    }

    #[test]
    fn test_start_after_end_collapses_to_end_comparison() {
        let mut engine = CountdownEngine::new(false);
        engine.set_window(Some(window(5, 2)));

        // Before end: active even though "start" is in the future
        assert_eq!(engine.tick(t0()).status, CountdownStatus::Active);
        // Past end: ended
        assert_eq!(
            engine.tick(t0() + Duration::hours(3)).status,
            CountdownStatus::Ended
        );
    }

    #[test]
    fn test_multi_day_window_renders_large_hours() {
        let mut engine = CountdownEngine::new(false);
        engine.set_window(Some(window(-1, 72)));

        let tick = engine.tick(t0());
        assert_eq!(tick.status, CountdownStatus::Active);
        assert_eq!(tick.fields.hours, "72");
        assert!(!tick.ending_soon);
    }

    #[test]
    fn test_decomposition_bounds() {
        // fields account for the distance to within one display unit
        for distance in [0i64, 999, 1_000, 59_999, 61_010, 3_599_990, 86_400_123] {
            let fields = RemainderFields::from_distance(distance, true);
            let h: i64 = fields.hours.parse().unwrap();
            let m: i64 = fields.minutes.parse().unwrap();
            let s: i64 = fields.seconds.parse().unwrap();
            let cs: i64 = fields.milliseconds.as_ref().unwrap().parse().unwrap();
            let sum = h * MS_PER_HOUR + m * MS_PER_MINUTE + s * MS_PER_SECOND + cs * 10;
            assert!(sum <= distance && distance < sum + 10, "distance {}", distance);
            assert!(fields.hours.len() >= 2);
            assert_eq!(fields.minutes.len(), 2);
            assert_eq!(fields.seconds.len(), 2);
        }
    }

    #[test]
    fn test_millis_field_only_when_tracked() {
        let fields = RemainderFields::from_distance(1234, false);
        assert!(fields.milliseconds.is_none());
        let fields = RemainderFields::from_distance(1234, true);
        assert_eq!(fields.milliseconds.as_deref(), Some("23"));
    }

    #[test]
    fn test_bengali_digit_round_trip() {
        assert_eq!(to_bengali_digits("05:42"), "০৫:৪২");
        for input in ["00", "12:34:56", "no digits", "7 d"] {
            assert_eq!(to_latin_digits(&to_bengali_digits(input)), input);
        }
    }
}
