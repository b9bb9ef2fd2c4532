//! Forced logout after a fixed period without user interaction.
//!
//! The monitor is a deadline, not a background task: the event loop
//! feeds it qualifying input events and polls it once per tick. Arming
//! and disarming are tied to session lifetime - it is armed exactly
//! while a session exists, so no deadline can survive a logout.

use std::time::{Duration, Instant};

use tracing::debug;

/// Inactivity timeout in minutes. Matches the portal's session policy.
const INACTIVITY_TIMEOUT_MINUTES: u64 = 15;

pub struct InactivityMonitor {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl InactivityMonitor {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(INACTIVITY_TIMEOUT_MINUTES * 60))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    /// Arm the monitor when a session starts.
    pub fn arm(&mut self, now: Instant) {
        debug!(timeout_secs = self.timeout.as_secs(), "Inactivity monitor armed");
        self.deadline = Some(now + self.timeout);
    }

    /// Drop the deadline when the session ends.
    pub fn disarm(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Inactivity monitor disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Push the deadline out after a qualifying event. The previous
    /// deadline is replaced - exactly one deadline exists at a time, so
    /// resets can never stack. Ignored while disarmed.
    pub fn record_activity(&mut self, now: Instant) {
        if self.deadline.is_some() {
            self.deadline = Some(now + self.timeout);
        }
    }

    /// True once the deadline has passed with no qualifying activity.
    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(900);

    #[test]
    fn test_disarmed_monitor_never_expires() {
        let monitor = InactivityMonitor::new();
        assert!(!monitor.is_armed());
        assert!(!monitor.expired(Instant::now() + Duration::from_secs(86_400)));
    }

    #[test]
    fn test_expires_after_timeout_with_no_activity() {
        let t0 = Instant::now();
        let mut monitor = InactivityMonitor::with_timeout(TIMEOUT);
        monitor.arm(t0);

        assert!(!monitor.expired(t0 + TIMEOUT - Duration::from_secs(1)));
        assert!(monitor.expired(t0 + TIMEOUT));
        assert!(monitor.expired(t0 + TIMEOUT + Duration::from_secs(1)));
    }

    #[test]
    fn test_activity_keeps_pushing_the_deadline_out() {
        let t0 = Instant::now();
        let mut monitor = InactivityMonitor::with_timeout(TIMEOUT);
        monitor.arm(t0);

        // Events at intervals shorter than the timeout prevent expiry
        // indefinitely
        let mut now = t0;
        for _ in 0..10 {
            now += TIMEOUT - Duration::from_secs(60);
            assert!(!monitor.expired(now));
            monitor.record_activity(now);
        }
        // Silence past the last reset still expires
        assert!(monitor.expired(now + TIMEOUT));
    }

    #[test]
    fn test_disarm_drops_the_deadline() {
        let t0 = Instant::now();
        let mut monitor = InactivityMonitor::with_timeout(TIMEOUT);
        monitor.arm(t0);
        monitor.disarm();

        assert!(!monitor.is_armed());
        assert!(!monitor.expired(t0 + TIMEOUT * 2));
        // Activity while disarmed must not re-arm
        monitor.record_activity(t0 + TIMEOUT * 2);
        assert!(!monitor.is_armed());
    }
}
