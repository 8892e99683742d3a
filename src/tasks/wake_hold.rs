//! Display wake-lock holder
//!
//! Keeps the kiosk display from sleeping by holding a systemd idle/sleep
//! inhibitor for the lifetime of the process. The platform can drop the
//! inhibitor (logind restart, session change); a watchdog re-acquires it.
//! On hosts without systemd this logs once and idles; losing the lock is
//! never fatal.

use std::time::Duration;

use tokio::{process::Command, time::interval};
use tracing::{debug, info, warn};

/// How often the watchdog verifies the inhibitor is still held. Matches the
/// re-acquire-on-visibility behavior of the original display.
const WATCHDOG_SECS: u64 = 15;

/// A held `systemd-inhibit` child. The lock lives exactly as long as the
/// child process does.
struct InhibitLock {
    child: Option<tokio::process::Child>,
}

impl InhibitLock {
    fn new() -> Self {
        Self { child: None }
    }

    async fn acquire(&mut self) -> Result<(), String> {
        let child = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=jackpot-kiosk",
                "--why=Unattended kiosk display",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .spawn()
            .map_err(|e| format!("Failed to spawn systemd-inhibit: {}", e))?;
        self.child = Some(child);
        Ok(())
    }

    /// Whether the inhibitor child is still running.
    fn held(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for InhibitLock {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.start_kill();
        }
    }
}

/// Check whether the host can hold inhibitors at all.
async fn inhibit_available() -> bool {
    Command::new("systemd-inhibit")
        .arg("--version")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Background task holding the display wake lock for the screen's lifetime.
pub async fn wake_hold_task() {
    if !inhibit_available().await {
        warn!("systemd-inhibit not available; display may sleep during the campaign");
        return;
    }

    info!("Starting wake hold task");
    let mut lock = InhibitLock::new();

    match lock.acquire().await {
        Ok(()) => info!("Display wake lock acquired"),
        Err(e) => warn!("Failed to acquire wake lock: {}", e),
    }

    let mut ticker = interval(Duration::from_secs(WATCHDOG_SECS));
    loop {
        ticker.tick().await;

        if lock.held() {
            debug!("Wake lock still held");
            continue;
        }

        info!("Wake lock was released, re-acquiring");
        if let Err(e) = lock.acquire().await {
            warn!("Failed to re-acquire wake lock: {}", e);
        }
    }
}
