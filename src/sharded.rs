// src/sharded.rs

//! Key-partitioned variant of [`LeakyBucketCache`].
//!
//! Each shard is an independent cache with its own lock and its own garbage
//! collection, holding an even share of the total capacity. Callers contending
//! on different shards do not block each other.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::LeakyBucketConfig;
use crate::errors::LeakyBucketError;
use crate::key::bucket_key;
use crate::leaky_cache::{BucketDecision, LeakyBucketCache};

#[derive(Debug)]
pub struct ShardedLeakyBucketCache<C = SystemClock>
where
    C: Clock,
{
    shards: Vec<LeakyBucketCache<C>>,
}

impl ShardedLeakyBucketCache<SystemClock> {
    /// Create `shards` partitions sharing `max_entries` buckets between them.
    /// Returns `None` when either argument is zero.
    pub fn new(max_entries: usize, shards: usize) -> Option<Self> {
        Self::with_config(LeakyBucketConfig::new(max_entries), shards, SystemClock).ok()
    }
}

impl<C> ShardedLeakyBucketCache<C>
where
    C: Clock + Clone,
{
    /// Split `config` across `shards` partitions. Capacity is divided evenly,
    /// the first `max_entries % shards` shards taking one extra bucket, and the
    /// gc margin is divided evenly. There must be at least one bucket per shard.
    pub fn with_config(
        config: LeakyBucketConfig,
        shards: usize,
        clock: C,
    ) -> Result<Self, LeakyBucketError> {
        config.validate()?;
        if shards == 0 || shards > config.max_entries {
            return Err(LeakyBucketError::InvalidShardCount);
        }

        let base = config.max_entries / shards;
        let extra = config.max_entries % shards;
        let margin = config.gc_must_remove_entries / shards;

        let shards = (0..shards)
            .map(|shard| {
                let capacity = if shard < extra { base + 1 } else { base };
                let shard_config = config
                    .clone()
                    .max_entries(capacity)
                    .gc_must_remove_entries(margin);
                LeakyBucketCache::with_config(shard_config, clock.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { shards })
    }
}

impl<C> ShardedLeakyBucketCache<C>
where
    C: Clock,
{
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total capacity across all shards.
    pub fn max_entries(&self) -> usize {
        self.shards.iter().map(LeakyBucketCache::max_entries).sum()
    }

    /// Live buckets across all shards. Each shard is locked in turn, so the
    /// sum is not a single atomic snapshot.
    pub fn len(&self) -> usize {
        self.shards.iter().map(LeakyBucketCache::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(LeakyBucketCache::is_empty)
    }

    fn shard(&self, key: u64) -> &LeakyBucketCache<C> {
        &self.shards[(key % self.shards.len() as u64) as usize]
    }

    pub fn put(&self, key: u64, quantity: i64, limit: i64) -> Result<BucketDecision, LeakyBucketError> {
        self.shard(key).put(key, quantity, limit)
    }

    pub fn put_str(&self, key: &str, quantity: i64, limit: i64) -> Result<BucketDecision, LeakyBucketError> {
        self.put(bucket_key(key), quantity, limit)
    }

    pub fn put_at(&self, key: u64, quantity: i64, limit: i64, now: u64) -> BucketDecision {
        self.shard(key).put_at(key, quantity, limit, now)
    }

    pub fn put_str_at(&self, key: &str, quantity: i64, limit: i64, now: u64) -> BucketDecision {
        self.put_at(bucket_key(key), quantity, limit, now)
    }

    /// Run a garbage collection pass on every shard.
    pub fn collect_garbage(&self) -> Result<usize, LeakyBucketError> {
        self.shards.iter().map(LeakyBucketCache::collect_garbage).sum()
    }

    pub fn collect_garbage_at(&self, now: u64) -> usize {
        self.shards.iter().map(|shard| shard.collect_garbage_at(now)).sum()
    }
}
