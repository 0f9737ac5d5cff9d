// src/table/gc.rs

// capacity-bounding garbage collection for the bucket table

// dependencies
use super::BucketTable;
use crate::config::LeakyBucketConfig;
use tracing::debug;

impl BucketTable {
    /// Free up space in the table, forcibly if necessary, until at most
    /// `config.gc_target()` entries remain. Returns the number of entries removed.
    ///
    /// Costs at most two scan windows plus the forced deletions, independent
    /// of the table size.
    pub(crate) fn gc(&mut self, now: u64, config: &LeakyBucketConfig) -> usize {
        let mut left = self.len().saturating_sub(config.gc_target());

        // Try freeing up drained buckets in a random part of the table.
        let scanned = self.scan(now, config.gc_scan_entries);
        left = left.saturating_sub(scanned);
        if left == 0 {
            debug!(scanned, remaining = self.len(), "gc finished after first scan");
            return scanned;
        }

        // If that failed, try one more time in a different part of the table.
        let rescanned = self.scan(now, config.gc_scan_entries);
        left = left.saturating_sub(rescanned);
        if left == 0 {
            debug!(scanned, rescanned, remaining = self.len(), "gc finished after second scan");
            return scanned + rescanned;
        }

        // Active buckets are forgiven: they restart empty on their next put.
        let forced = self.evict(left);
        debug!(
            scanned,
            rescanned,
            forced,
            remaining = self.len(),
            "gc forcibly evicted active buckets"
        );

        scanned + rescanned + forced
    }

    /// Drain up to `count` buckets to `now` and delete the ones left empty.
    fn scan(&mut self, now: u64, count: usize) -> usize {
        let mut empty = Vec::new();

        for slot in self.window(count) {
            let (key, entry) = &mut self.buckets[slot];
            *entry = entry.advance(now);
            if entry.tokens <= 0 {
                empty.push(*key);
            }
        }

        for &key in &empty {
            self.remove(key);
        }

        empty.len()
    }

    /// Delete `count` buckets regardless of their load.
    fn evict(&mut self, count: usize) -> usize {
        let victims: Vec<u64> = self.window(count).map(|slot| self.buckets[slot].0).collect();

        for &key in &victims {
            self.remove(key);
        }

        victims.len()
    }
}
