//! History of forwarded lines

use std::collections::VecDeque;

/// Default number of lines kept in the history
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Bounded list of lines that were written to the destination,
/// newest first. A capacity of zero keeps nothing.
#[derive(Debug, Clone)]
pub struct SentHistory {
    lines: VecDeque<String>,
    capacity: usize,
}

impl SentHistory {
    /// Create an empty history holding at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_SIZE)),
            capacity,
        }
    }

    /// Record a line as the most recent entry, evicting the oldest on overflow
    pub fn record(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_back();
        }
        self.lines.push_front(line.into());
    }

    /// Snapshot of the lines, newest first
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

impl Default for SentHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
