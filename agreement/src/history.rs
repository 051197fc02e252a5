//! Bounded undo history.
//!
//! A LIFO of item snapshots. Once the stack holds `capacity` snapshots the
//! oldest one is evicted on every push.

use crate::item::Item;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of undo steps kept per session
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable copy of the item list
pub type Snapshot = Arc<[Item]>;

/// Snapshot stack with drop-oldest eviction
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl HistoryStack {
    /// Create an empty stack holding at most `capacity` snapshots
    ///
    /// A zero capacity is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Capture `items` by value and push the copy
    ///
    /// Returns `true` when the oldest snapshot had to be evicted.
    pub fn record(&mut self, items: &[Item]) -> bool {
        self.push(Arc::from(items))
    }

    /// Push a snapshot on top
    ///
    /// Returns `true` when the oldest snapshot had to be evicted.
    pub fn push(&mut self, snapshot: Snapshot) -> bool {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front();
            true
        } else {
            false
        };
        self.entries.push_back(snapshot);
        evicted
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Most recent snapshot without removing it
    #[must_use]
    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// Whether there is nothing to undo
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of stored snapshots
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
