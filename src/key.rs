// src/key.rs

// maps string identifiers onto numeric bucket keys

// dependencies
use fnv::FnvHasher;
use std::hash::Hasher;

/// Hash a string identifier into a bucket key with 64-bit FNV-1a.
///
/// Distinct strings that collide share a bucket.
pub fn bucket_key(key: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(key.as_bytes());
    hasher.finish()
}
