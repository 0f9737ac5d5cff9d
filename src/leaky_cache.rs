// src/leaky_cache.rs

// leaky-limiter: a size-limited cache of leaky buckets keyed by u64.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::LeakyBucketConfig;
use crate::entry::Entry;
use crate::errors::LeakyBucketError;
use crate::key::bucket_key;
use crate::table::BucketTable;
use parking_lot::Mutex;
use tracing::{debug, trace};

/// The main leaky bucket cache.
/// C is the clock type, defaulting to SystemClock.
/// A single `Mutex` guards the whole bucket table, so every operation,
/// including any garbage collection it triggers, is serialized.
#[derive(Debug)]
pub struct LeakyBucketCache<C = SystemClock>
where
    C: Clock,
{
    config: LeakyBucketConfig,
    buckets: Mutex<BucketTable>,
    clock: C,
}

impl LeakyBucketCache<SystemClock> {
    /// Create a cache holding up to `max_entries` buckets with the default
    /// garbage collection settings. Returns `None` when `max_entries` is zero.
    pub fn new(max_entries: usize) -> Option<Self> {
        Self::with_config(LeakyBucketConfig::new(max_entries), SystemClock).ok()
    }
}

// methods for the LeakyBucketCache type
impl<C> LeakyBucketCache<C>
where
    C: Clock,
{
    // method to create a new cache from a config object
    pub fn with_config(config: LeakyBucketConfig, clock: C) -> Result<Self, LeakyBucketError> {
        config.validate()?;
        debug!(
            max_entries = config.max_entries,
            gc_scan_entries = config.gc_scan_entries,
            gc_must_remove_entries = config.gc_must_remove_entries,
            "creating leaky bucket cache"
        );

        Ok(Self {
            buckets: Mutex::new(BucketTable::with_capacity(config.max_entries)),
            config,
            clock,
        })
    }

    // accessor method to return the configured capacity
    pub fn max_entries(&self) -> usize {
        self.config.max_entries
    }

    // accessor method to return the full configuration
    pub fn config(&self) -> &LeakyBucketConfig {
        &self.config
    }

    /// Number of live buckets.
    pub fn len(&self) -> usize {
        self.buckets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to add `quantity` tokens to the bucket for `key`, which holds at
    /// most `limit` tokens, at the current clock time.
    pub fn put(&self, key: u64, quantity: i64, limit: i64) -> Result<BucketDecision, LeakyBucketError> {
        let now = self.clock.now()?;
        Ok(self.put_at(key, quantity, limit, now))
    }

    /// Like [`put`](Self::put), keyed by a string identifier.
    pub fn put_str(&self, key: &str, quantity: i64, limit: i64) -> Result<BucketDecision, LeakyBucketError> {
        let key = bucket_key(key);
        let now = self.clock.now()?;
        Ok(self.put_at(key, quantity, limit, now))
    }

    /// Attempt to add `quantity` tokens to the bucket for `key` at time `now`
    /// (nanoseconds). A rejected request still drains the bucket up to `now`.
    pub fn put_at(&self, key: u64, quantity: i64, limit: i64, now: u64) -> BucketDecision {
        let mut buckets = self.buckets.lock();
        admit(&mut buckets, &self.config, key, quantity, limit, now)
    }

    /// Like [`put_at`](Self::put_at), keyed by a string identifier.
    pub fn put_str_at(&self, key: &str, quantity: i64, limit: i64, now: u64) -> BucketDecision {
        self.put_at(bucket_key(key), quantity, limit, now)
    }

    /// Run a garbage collection pass at the current clock time.
    /// Below capacity this only reclaims drained buckets from one scan window.
    /// Returns the number of buckets removed.
    pub fn collect_garbage(&self) -> Result<usize, LeakyBucketError> {
        let now = self.clock.now()?;
        Ok(self.collect_garbage_at(now))
    }

    pub fn collect_garbage_at(&self, now: u64) -> usize {
        self.buckets.lock().gc(now, &self.config)
    }
}

// drain, test and write back a single bucket; must be called under the lock
fn admit(
    buckets: &mut BucketTable,
    config: &LeakyBucketConfig,
    key: u64,
    quantity: i64,
    limit: i64,
    now: u64,
) -> BucketDecision {
    let (entry, existed) = match buckets.get(key) {
        Some(entry) => (entry.advance(now), true),
        None => (Entry::empty(now), false),
    };

    let admitted = entry.tokens.saturating_add(quantity) <= limit;
    let entry = if admitted {
        Entry {
            tokens: entry.tokens.saturating_add(quantity),
            ..entry
        }
    } else {
        trace!(key, tokens = entry.tokens, quantity, limit, "bucket full, request rejected");
        entry
    };

    let inserted = buckets.upsert(key, entry);
    if inserted && buckets.len() > config.max_entries {
        buckets.gc(now, config);
    }

    BucketDecision {
        tokens: entry.tokens,
        existed,
        admitted,
    }
}

/// Result of a single put, copied out from under the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketDecision {
    /// Tokens in the bucket after this call
    pub tokens: i64,
    /// Whether the bucket existed before this call
    pub existed: bool,
    /// Whether there was room for the requested quantity
    pub admitted: bool,
}

impl BucketDecision {
    /// Split into `(tokens, existed, admitted)`.
    pub fn into_parts(self) -> (i64, bool, bool) {
        (self.tokens, self.existed, self.admitted)
    }
}
