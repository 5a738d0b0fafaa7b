//! Bounded restart retry policy
//!
//! Each recognition failure schedules restarts from a fixed delay
//! schedule instead of an open-ended timer chain. The schedule length
//! bounds the retries: once it is exhausted no further restart is
//! attempted for that originating error.

use std::time::Duration;

/// Delay before restarting after a normal end-of-utterance (milliseconds)
pub const RESTART_AFTER_END_MS: u64 = 200;

/// Delay before restarting after a no-speech/audio-capture error
pub const RESTART_AFTER_TRANSIENT_MS: u64 = 300;

/// Delay before restarting after any other recoverable error
pub const RESTART_AFTER_GENERIC_MS: u64 = 500;

/// Fallback delay for the single extra retry when a restart itself fails
pub const RESTART_FALLBACK_MS: u64 = 1000;

/// An ordered schedule of restart delays.
/// `delay(0)` is the initial restart, `delay(1)` the single fallback
/// retry; `None` means give up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Build a policy from an explicit delay schedule
    pub fn new(delays: impl Into<Vec<Duration>>) -> Self {
        Self {
            delays: delays.into(),
        }
    }

    /// Schedule used after the stream ends normally
    pub fn after_stream_end() -> Self {
        Self::new([
            Duration::from_millis(RESTART_AFTER_END_MS),
            Duration::from_millis(RESTART_FALLBACK_MS),
        ])
    }

    /// Schedule used after a no-speech or audio-capture error
    pub fn after_transient_error() -> Self {
        Self::new([
            Duration::from_millis(RESTART_AFTER_TRANSIENT_MS),
            Duration::from_millis(RESTART_FALLBACK_MS),
        ])
    }

    /// Schedule used after any other recoverable error
    pub fn after_generic_error() -> Self {
        Self::new([
            Duration::from_millis(RESTART_AFTER_GENERIC_MS),
            Duration::from_millis(RESTART_FALLBACK_MS),
        ])
    }

    /// Delay for the given attempt, or `None` once the schedule is spent
    pub fn delay(&self, attempt: usize) -> Option<Duration> {
        self.delays.get(attempt).copied()
    }

    /// Total number of attempts this policy allows
    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }
}
