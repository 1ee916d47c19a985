//! Linear undo/redo over whole-state snapshots.
//!
//! The stack holds pre-mutation copies. While no undo has happened the cursor
//! sits one past the newest entry ("at the head"); the first undo from there
//! first stores the live state so a redo can come back to it.
//!
//! ```text
//!   record(s0) record(s1)        [s0 s1] ^          live = s2
//!   undo                         [s0 s1 s2]         cursor -> s1
//!   undo                         [s0 s1 s2]         cursor -> s0
//!   redo redo                    [s0 s1 s2]         cursor -> s2
//! ```

use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct HistoryStore<S: Clone> {
    entries: VecDeque<S>,
    cursor: usize,
    capacity: usize,
}

impl<S: Clone> Default for HistoryStore<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S: Clone> HistoryStore<S> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            cursor: 0,
            capacity,
        }
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

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Stores the state as it was before a mutation.
    ///
    /// Anything beyond the cursor (the redo branch) is discarded.
    pub fn record(&mut self, pre_mutation: S) {
        self.entries.truncate(self.cursor);
        self.entries.push_back(pre_mutation);
        self.evict();
        self.cursor = self.entries.len();
    }

    /// Returns the state to restore, or `None` at the start of history.
    pub fn undo(&mut self, live: &S) -> Option<S> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push_back(live.clone());
            self.evict();
            self.cursor = self.entries.len() - 2;
        } else {
            self.cursor -= 1;
        }
        self.entries.get(self.cursor).cloned()
    }

    /// Returns the state to restore, or `None` when nothing lies ahead.
    pub fn redo(&mut self) -> Option<S> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Applies `f` to every stored snapshot.
    pub fn for_each_mut(&mut self, f: impl FnMut(&mut S)) {
        self.entries.iter_mut().for_each(f);
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}
