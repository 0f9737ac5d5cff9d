// src/entry.rs

// decay model for a single bucket

/// Load held by one bucket and the time it was last drained.
///
/// Tokens and time share a unit: one token drains per elapsed nanosecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) tokens: i64,
    pub(crate) updated: u64,
}

impl Entry {
    /// An empty bucket created at `now`.
    pub(crate) fn empty(now: u64) -> Self {
        Self { tokens: 0, updated: now }
    }

    /// Drain the bucket according to how much time has elapsed since the last update.
    /// A clock reading earlier than `updated` drains nothing.
    pub(crate) fn advance(self, now: u64) -> Self {
        let elapsed = i64::try_from(now.saturating_sub(self.updated)).unwrap_or(i64::MAX);
        let tokens = self.tokens.saturating_sub(elapsed).max(0);

        Self { tokens, updated: now }
    }
}
