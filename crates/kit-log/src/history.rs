//! History — bounded, shared, in-memory record of formatted log lines.
//!
//! One `LogHistory` is shared (behind an `Arc`) by every sink that should see
//! the same history. Its mutex is also the lock that serialises console and
//! file output across those sinks.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capacity used by [`LogHistory::default`].
pub const DEFAULT_MAX_CAPACITY: i64 = 16_384;

/// FIFO-bounded list of formatted lines.
#[derive(Debug)]
pub struct LogHistory {
    inner: Mutex<HistoryInner>,
}

#[derive(Debug)]
pub(crate) struct HistoryInner {
    entries: VecDeque<String>,
    max_capacity: Option<usize>,
}

impl HistoryInner {
    /// Append a line, evicting from the front until the capacity holds.
    pub(crate) fn push(&mut self, line: String) {
        self.entries.push_back(line);
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        if let Some(max) = self.max_capacity {
            while self.entries.len() > max {
                self.entries.pop_front();
            }
        }
    }
}

/// A non-positive capacity means "unbounded".
fn capacity_from(max_capacity: i64) -> Option<usize> {
    usize::try_from(max_capacity).ok().filter(|&max| max > 0)
}

impl LogHistory {
    /// Create a history holding at most `max_capacity` lines. Zero or a
    /// negative value disables the bound.
    pub fn new(max_capacity: i64) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                entries: VecDeque::new(),
                max_capacity: capacity_from(max_capacity),
            }),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        // A panic while holding the lock cannot leave the deque half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `None` when unbounded.
    pub fn max_capacity(&self) -> Option<usize> {
        self.lock().max_capacity
    }

    /// Change the bound. Lowering it evicts the oldest lines immediately.
    pub fn set_max_capacity(&self, max_capacity: i64) {
        let mut inner = self.lock();
        inner.max_capacity = capacity_from(max_capacity);
        inner.enforce_capacity();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// All retained lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Most recently recorded line.
    pub fn latest(&self) -> Option<String> {
        self.lock().entries.back().cloned()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lock().entries.iter().any(|entry| entry == line)
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }
}

impl Default for LogHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
