// src/lib.rs

//! # Leaky Limiter
//!
//! A bounded-memory rate limiting cache based on the leaky bucket algorithm.
//!
//! Every key owns a bucket that fills by the requested quantity and drains
//! one token per elapsed nanosecond. A request is admitted only while its
//! bucket has room. When the cache grows past its capacity, drained buckets
//! are reclaimed first and, under sustained load, active ones are evicted.
//!
//! ## Quick Example
//!
//! ```rust
//! use leaky_limiter::{DRAIN_PER_SECOND, LeakyBucketCache};
//!
//! // one request per millisecond, bursts of up to ten
//! const COST: i64 = DRAIN_PER_SECOND / 1_000;
//! const LIMIT: i64 = 10 * COST;
//!
//! let cache = LeakyBucketCache::new(10_000).expect("capacity is positive");
//!
//! let decision = cache.put_str("user_123", COST, LIMIT).unwrap();
//! if decision.admitted {
//!     println!("Request allowed");
//! } else {
//!     println!("Rate limited - bucket holds {} tokens", decision.tokens);
//! }
//! ```

// private modules
mod clock;
mod config;
mod entry;
mod errors;
mod key;
mod leaky_cache;
mod sharded;
mod table;

// public API exports
pub use clock::{Clock, ClockError, SystemClock};
pub use config::{
    DEFAULT_GC_MUST_REMOVE_ENTRIES, DEFAULT_GC_SCAN_ENTRIES, DRAIN_PER_SECOND, LeakyBucketConfig,
};
pub use errors::LeakyBucketError;
pub use key::bucket_key;
pub use leaky_cache::{BucketDecision, LeakyBucketCache};
pub use sharded::ShardedLeakyBucketCache;
