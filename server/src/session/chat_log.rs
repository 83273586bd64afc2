use std::collections::VecDeque;

use super::events::LogEntry;

/// Bounded log of recent lines, oldest first.
#[derive(Debug, Clone)]
pub struct ChatLog {
    entries: VecDeque<LogEntry>,
    limit: usize,
}

impl ChatLog {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append, evicting the oldest entry when full.
    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove matching entries; returns how many were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&LogEntry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(e));
        before - self.entries.len()
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
