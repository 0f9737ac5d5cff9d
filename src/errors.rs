// src/errors.rs

// error handling for the leaky bucket cache

// dependencies
use thiserror::Error;

use crate::clock::ClockError;

/// Error type for cache construction and clock failures.
///
/// A rejected request is not an error; see [`BucketDecision::admitted`](crate::BucketDecision).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LeakyBucketError {
    #[error("max entries must be positive")]
    InvalidMaxEntries,
    #[error("shard count must be positive")]
    InvalidShardCount,
    #[error("clock error occurred: {0}")]
    ClockError(#[from] ClockError),
}
