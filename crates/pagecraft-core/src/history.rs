//! Linear snapshot history with a cursor.

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A linear undo/redo stack of full snapshots.
///
/// `snapshots[cursor]` is always the state the owner should be showing.
/// Recording after an undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct History<S> {
    snapshots: Vec<S>,
    cursor: usize,
    limit: Option<usize>,
}

impl<S: Clone> History<S> {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, Some(DEFAULT_HISTORY_LIMIT))
    }

    /// Start a history keeping at most `limit` snapshots (None = unbounded).
    pub fn with_limit(initial: S, limit: Option<usize>) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Push a snapshot after the cursor, pruning anything redo-able.
    pub fn record(&mut self, snapshot: S) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;

        let limit = self.limit.unwrap_or(usize::MAX);
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Step back. Returns the snapshot to restore, or None at the start.
    pub fn undo(&mut self) -> Option<&S> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward. Returns the snapshot to restore, or None at the end.
    pub fn redo(&mut self) -> Option<&S> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &S {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Rewrite every snapshot in place (e.g. to purge a deleted page).
    pub fn rewrite(&mut self, mut f: impl FnMut(&mut S)) {
        for snapshot in &mut self.snapshots {
            f(snapshot);
        }
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: S) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }
}
