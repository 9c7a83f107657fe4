//! Bounded undo history.

use std::collections::VecDeque;

/// Default number of snapshots a layer keeps.
pub const DEFAULT_UNDO_CAPACITY: usize = 50;

/// A fixed-capacity snapshot buffer: pushing past capacity evicts the
/// oldest entry (FIFO), popping returns the most recent (LIFO).
///
/// Backed by a ring buffer so both operations are O(1).
#[derive(Debug, Clone)]
pub struct UndoHistory<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> UndoHistory<T> {
    /// Create a history with a fixed capacity. A capacity of zero keeps
    /// no snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push a snapshot, evicting the oldest one when full.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate snapshots oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for UndoHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}
