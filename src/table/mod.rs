// src/table/mod.rs

//! Bounded storage for bucket entries.
//!
//! Buckets live in a dense vector indexed by key, so removal is an O(1)
//! swap-remove and any slot can be picked at random. The live count is the
//! length of that vector, which keeps it equal to the number of mappings.

// dependencies
use crate::entry::Entry;
use rand::Rng;
use rustc_hash::FxHashMap;

mod gc;

#[derive(Debug, Default)]
pub(crate) struct BucketTable {
    /// Dense array of buckets for O(1) random access
    buckets: Vec<(u64, Entry)>,
    /// Maps key to its slot in `buckets`
    index: FxHashMap<u64, usize>,
}

impl BucketTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of live entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn get(&self, key: u64) -> Option<Entry> {
        self.index.get(&key).map(|&slot| self.buckets[slot].1)
    }

    /// Writes `entry` for `key`, replacing any previous value.
    /// Returns `true` when the key was not present before.
    pub(crate) fn upsert(&mut self, key: u64, entry: Entry) -> bool {
        match self.index.get(&key) {
            Some(&slot) => {
                self.buckets[slot].1 = entry;
                false
            }
            None => {
                self.index.insert(key, self.buckets.len());
                self.buckets.push((key, entry));
                true
            }
        }
    }

    pub(crate) fn remove(&mut self, key: u64) -> Option<Entry> {
        let slot = self.index.remove(&key)?;
        let (_, entry) = self.buckets.swap_remove(slot);

        // the former last bucket now lives in `slot`
        if let Some(&(moved, _)) = self.buckets.get(slot) {
            self.index.insert(moved, slot);
        }

        Some(entry)
    }

    /// Uniformly random slot. The table must not be empty.
    fn random_slot(&self) -> usize {
        rand::rng().random_range(0..self.buckets.len())
    }

    /// Keys of up to `count` consecutive slots starting at a random slot,
    /// wrapping around the end of the table.
    fn window(&self, count: usize) -> impl Iterator<Item = usize> + use<> {
        let len = self.buckets.len();
        let start = if len == 0 { 0 } else { self.random_slot() };
        (0..count.min(len)).map(move |offset| (start + offset) % len)
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.buckets.len(), self.index.len());
        for (slot, (key, _)) in self.buckets.iter().enumerate() {
            assert_eq!(self.index.get(key), Some(&slot));
        }
    }
}
