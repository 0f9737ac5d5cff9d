// src/config.rs

//! Configuration types for the leaky bucket cache

// dependencies
use crate::errors::LeakyBucketError;

/// Tokens drained from every bucket per second: one per nanosecond.
/// Quantities and limits are expressed in this unit.
pub const DRAIN_PER_SECOND: i64 = 1_000_000_000;

/// Entries sampled by each targeted scan phase of the garbage collector.
pub const DEFAULT_GC_SCAN_ENTRIES: usize = 1000;

/// Headroom below `max_entries` that the garbage collector aims for.
pub const DEFAULT_GC_MUST_REMOVE_ENTRIES: usize = 100;

/// Configuration for cache capacity and garbage collection behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakyBucketConfig {
    pub(crate) max_entries: usize,
    pub(crate) gc_scan_entries: usize,
    pub(crate) gc_must_remove_entries: usize,
}

impl LeakyBucketConfig {
    /// Create a new configuration holding up to `max_entries` buckets
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            gc_scan_entries: DEFAULT_GC_SCAN_ENTRIES,
            gc_must_remove_entries: DEFAULT_GC_MUST_REMOVE_ENTRIES,
        }
    }

    /// Builder-style: set the maximum number of buckets
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Builder-style: set how many entries each scan phase samples
    pub fn gc_scan_entries(mut self, gc_scan_entries: usize) -> Self {
        self.gc_scan_entries = gc_scan_entries;
        self
    }

    /// Builder-style: set the hysteresis margin below `max_entries`
    pub fn gc_must_remove_entries(mut self, gc_must_remove_entries: usize) -> Self {
        self.gc_must_remove_entries = gc_must_remove_entries;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LeakyBucketError> {
        if self.max_entries == 0 {
            return Err(LeakyBucketError::InvalidMaxEntries);
        }
        Ok(())
    }

    /// Number of live entries a garbage collection run shrinks the table to.
    /// A margin wider than the capacity empties the table.
    pub(crate) fn gc_target(&self) -> usize {
        self.max_entries.saturating_sub(self.gc_must_remove_entries)
    }
}
