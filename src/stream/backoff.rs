//! Reconnect delay.

use std::time::{Duration, Instant};

pub const INITIAL_DELAY: Duration = Duration::from_secs(1);
pub const MAX_DELAY: Duration = Duration::from_secs(30);

/// Bounded exponential reconnect delay.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
    next_retry_at: Option<Instant>,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(INITIAL_DELAY, MAX_DELAY)
    }
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let initial = initial.max(Duration::from_millis(1));
        Self {
            initial,
            max: max.max(initial),
            current: initial,
            next_retry_at: None,
        }
    }

    /// Records a lost connection and schedules the next attempt.
    pub fn mark_failure(&mut self, now: Instant) -> Duration {
        let delay = self.current;
        self.next_retry_at = Some(now + delay);
        self.current = (self.current * 2).min(self.max);
        delay
    }

    /// Resets the delay after a successful open.
    pub fn mark_success(&mut self) {
        self.current = self.initial;
        self.next_retry_at = None;
    }

    /// True when a retry is scheduled and due.
    pub fn should_retry(&self, now: Instant) -> bool {
        self.next_retry_at.is_some_and(|at| now >= at)
    }

    /// Clears the pending retry once it was started.
    pub fn consume(&mut self) {
        self.next_retry_at = None;
    }

    /// Time left until the scheduled retry.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_retry_at.map(|at| at.saturating_duration_since(now))
    }
}
