//! Kiosk resilience background task
//!
//! Unattended kiosk hardware accumulates render and memory leaks over long
//! sessions; the original display mitigated that with a periodic full page
//! reload plus a once-per-second check for an upcoming campaign crossing its
//! start instant (there is no push channel, so the boundary is polled).

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::time::interval;
use tracing::info;

use crate::{
    engine::{Clock, CountdownStatus},
    state::{AppState, ReloadReason},
};

/// One loop, two duties: the scheduled hard refresh (interval taken from the
/// active theme, falling back to the CLI default) and the start-boundary
/// refresh while an upcoming campaign is on screen.
pub async fn kiosk_resilience_task(state: Arc<AppState>, clock: Arc<dyn Clock>) {
    info!("Starting kiosk resilience task");

    let mut ticker = interval(Duration::from_secs(1));
    let mut next_refresh = clock.now() + refresh_period(&state);
    // Remember which start instant already fired so a slow reload cannot
    // double-trigger for the same campaign.
    let mut fired_start: Option<DateTime<Utc>> = None;

    loop {
        ticker.tick().await;
        let now = clock.now();

        if now >= next_refresh {
            info!("Scheduled kiosk refresh due, reloading screen");
            state.request_reload(ReloadReason::Scheduled);
            next_refresh = now + refresh_period(&state);
            continue;
        }

        let snapshot = state.latest_snapshot();
        if crossed_start(snapshot.status, snapshot.campaign_start, now)
            && fired_start != snapshot.campaign_start
        {
            info!("Campaign start boundary crossed, reloading screen");
            fired_start = snapshot.campaign_start;
            state.request_reload(ReloadReason::StartBoundary);
        }
    }
}

fn refresh_period(state: &AppState) -> chrono::Duration {
    let theme_minutes = state.latest_snapshot().theme.auto_reload_interval;
    let minutes = if theme_minutes > 0 {
        theme_minutes
    } else {
        state.settings.reload_minutes.max(1)
    };
    chrono::Duration::minutes(minutes as i64)
}

/// True once an upcoming campaign's start instant is no longer in the
/// future.
fn crossed_start(
    status: CountdownStatus,
    start: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    status == CountdownStatus::Upcoming && start.is_some_and(|s| now >= s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_crossed_start_requires_upcoming_status() {
        let start = Some(t0());
        assert!(crossed_start(CountdownStatus::Upcoming, start, t0()));
        assert!(crossed_start(
            CountdownStatus::Upcoming,
            start,
            t0() + Duration::seconds(30)
        ));
        // Already active or ended: the boundary is behind us, nothing to do
        assert!(!crossed_start(CountdownStatus::Active, start, t0()));
        assert!(!crossed_start(CountdownStatus::Ended, start, t0()));
        assert!(!crossed_start(CountdownStatus::Idle, None, t0()));
    }

    #[test]
    fn test_crossed_start_waits_for_the_instant() {
        let start = Some(t0());
        assert!(!crossed_start(
            CountdownStatus::Upcoming,
            start,
            t0() - Duration::seconds(1)
        ));
    }
}
