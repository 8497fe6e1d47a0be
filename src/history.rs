//! Bounded, linear undo/redo log of split-model snapshots.
//!
//! Entries live in a ring buffer with a cursor pointing at the current entry.
//! Recording after an undo discards the redo branch; recording past capacity
//! evicts the oldest entry while the cursor keeps pointing at the same snapshot.

use std::collections::VecDeque;

use tracing::*;

use crate::split::Splits;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    entries: VecDeque<Splits>,
    offset: usize,
    capacity: usize,
}

impl HistoryLog {
    /// Creates an empty log holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            offset: 0,
            capacity,
        }
    }

    /// Creates a log whose only entry is `baseline`.
    pub fn with_baseline(capacity: usize, baseline: Splits) -> Self {
        let mut log = Self::new(capacity);
        log.record(baseline);
        log
    }

    /// Appends a snapshot and makes it current.
    ///
    /// # Example
    /// ```
    /// use gridcut::{HistoryLog, Splits};
    ///
    /// let mut log = HistoryLog::new(2);
    /// log.record(Splits::grid(1, 0));
    /// log.record(Splits::grid(2, 0));
    /// log.record(Splits::grid(3, 0));
    /// assert_eq!(log.len(), 2);
    /// assert_eq!(log.current(), Some(&Splits::grid(3, 0)));
    /// ```
    pub fn record(&mut self, snapshot: Splits) {
        if !self.entries.is_empty() && self.offset < self.entries.len() - 1 {
            trace!("Discarding {} redo entries", self.entries.len() - 1 - self.offset);
            self.entries.truncate(self.offset + 1);
        }
        self.entries.push_back(snapshot);
        self.offset = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.offset -= 1;
        }
        trace!("History offset={} len={}", self.offset, self.entries.len());
    }

    /// Steps back one entry, returning the snapshot that is now current.
    ///
    /// Returns `None` and changes nothing when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&Splits> {
        if self.offset == 0 {
            return None;
        }
        self.offset -= 1;
        self.entries.get(self.offset)
    }

    /// Steps forward one entry, returning the snapshot that is now current.
    ///
    /// Returns `None` and changes nothing when already at the newest entry.
    pub fn redo(&mut self) -> Option<&Splits> {
        if self.offset + 1 >= self.entries.len() {
            return None;
        }
        self.offset += 1;
        self.entries.get(self.offset)
    }

    /// Drops every entry and starts over from `baseline`.
    pub fn reset(&mut self, baseline: Splits) {
        self.entries.clear();
        self.offset = 0;
        self.record(baseline);
    }

    pub fn current(&self) -> Option<&Splits> {
        self.entries.get(self.offset)
    }

    pub fn can_undo(&self) -> bool {
        self.offset > 0
    }

    pub fn can_redo(&self) -> bool {
        self.offset + 1 < self.entries.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
