//! Connection health
//!
//! Counts consecutive transport failures across every task. A single success resets the count.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::warn;

/// Consecutive failures at which the bot reports itself degraded
pub const DEGRADED_THRESHOLD: u32 = 5;

#[derive(Debug)]
pub struct HealthTracker {
    consecutive_failures: AtomicU32,
    threshold: u32,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new(DEGRADED_THRESHOLD)
    }
}

impl HealthTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            consecutive_failures: AtomicU32::new(0),
            threshold,
        }
    }

    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures == self.threshold {
            warn!(failures, "connection degraded");
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    pub fn is_degraded(&self) -> bool {
        self.consecutive_failures() >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_after_threshold_until_success() {
        let health = HealthTracker::default();
        for _ in 0..DEGRADED_THRESHOLD - 1 {
            health.record_failure();
        }
        assert!(!health.is_degraded());
        health.record_failure();
        assert!(health.is_degraded());
        health.record_failure();
        assert!(health.is_degraded());
        health.record_success();
        assert!(!health.is_degraded());
        assert_eq!(health.consecutive_failures(), 0);
    }
}
