use serde::{Deserialize, Serialize};

/// Position of the displayed record within the pending collection.
///
/// Every move is clamped into `[0, len - 1]`; there is no wraparound and
/// moving past either end is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move forward by one, stopping at the last record.
    pub fn advance(&mut self, len: usize) -> usize {
        self.index = match len {
            0 => 0,
            _ => (self.index + 1).min(len - 1),
        };
        self.index
    }

    /// Move back by one, stopping at the first record.
    pub fn retreat(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    /// Pull the cursor back into bounds after the collection shrank.
    ///
    /// Returns `None` once the collection is empty.
    pub fn clamp(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            self.index = 0;
            return None;
        }
        self.index = self.index.min(len - 1);
        Some(self.index)
    }
}
