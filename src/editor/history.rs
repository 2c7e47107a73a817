use std::collections::VecDeque;

use crate::raster::Snapshot;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Undo/redo stacks of raster snapshots.
///
/// The undo side is capped: pushing past the limit evicts the oldest entry.
/// Recording a fresh edit drops every redo entry.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SnapshotHistory {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo: VecDeque::with_capacity(limit + 1),
            redo: Vec::new(),
            limit,
        }
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Records the state preceding a forward edit.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.push_undo(snapshot);
        self.redo.clear();
    }

    /// Swaps `current` for the most recent undo entry, parking `current` on the redo stack.
    pub fn step_back(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.undo.pop_back()?;
        self.push_redo(current);
        Some(restored)
    }

    /// Swaps `current` for the most recent redo entry, parking `current` on the undo stack.
    pub fn step_forward(&mut self, current: Snapshot) -> Option<Snapshot> {
        let restored = self.redo.pop()?;
        self.push_undo(current);
        Some(restored)
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    fn push_redo(&mut self, snapshot: Snapshot) {
        self.redo.push(snapshot);
        if self.redo.len() > self.limit {
            self.redo.remove(0);
        }
    }
}
