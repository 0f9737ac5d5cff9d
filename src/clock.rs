// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Source of drain time for the cache.
/// Implementors must be thread-safe (Send + Sync).
///
/// `now` returns nanoseconds; every bucket drains one token per nanosecond
/// that passes between two readings. Readings are expected to move forward.
/// A reading earlier than a bucket's last update drains nothing, and a jump
/// ahead drains buckets by the full gap.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Failure to read drain time. The cache rejects the operation without
/// touching any bucket.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system time is before the unix epoch, cannot compute bucket drain time")]
    SystemTimeError,
}

/// Wall clock drain time: nanoseconds since the Unix epoch.
/// This is the default clock used by the cache. Stepping the system clock
/// back freezes draining until it catches up; stepping it forward drains
/// buckets early.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .map_err(|_| ClockError::SystemTimeError)
    }
}
