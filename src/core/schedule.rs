/// Cursor over a fixed ordered list that wraps back to the start.
///
/// Drives the restock command (one resource per press) and the topping command
/// (one topping per press).
#[derive(Debug, Clone)]
pub struct RoundRobin<T: Copy> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T: Copy> RoundRobin<T> {
    /// Panics if `entries` is empty
    pub fn new(entries: impl Into<Vec<T>>) -> Self {
        let entries = entries.into();
        assert!(!entries.is_empty(), "round robin needs at least one entry");
        Self { entries, cursor: 0 }
    }

    /// Entry the next `advance` will hand out
    pub fn current(&self) -> T {
        self.entries[self.cursor]
    }

    /// Return the current entry and move the cursor on by one
    pub fn advance(&mut self) -> T {
        let entry = self.entries[self.cursor];
        self.cursor = (self.cursor + 1) % self.entries.len();
        entry
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}
