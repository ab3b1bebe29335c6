//! Snapshot-based undo/redo history.
//!
//! Whole-buffer snapshots keep restore semantics trivial: the buffer operates
//! on full-text replacements, so a snapshot is just the text plus the cursor
//! offset at capture time. Successive identical states are deduplicated by
//! content hash, and the stack is capped at [`HISTORY_MAX`] entries with the
//! oldest dropped first.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const HISTORY_MAX: usize = 200;

/// A full-state snapshot for undo/redo.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub text: String,
    pub cursor: usize,
    /// Content hash at capture, used to skip pushing identical states.
    hash: u64,
}

impl Snapshot {
    fn capture(text: &str, cursor: usize) -> Self {
        Self {
            text: text.to_string(),
            cursor,
            hash: content_hash(text),
        }
    }
}

#[derive(Default, Debug)]
pub(crate) struct UndoEngine {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl UndoEngine {
    pub(crate) fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub(crate) fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record the pre-edit state. Any pending redo entries are invalidated.
    pub(crate) fn push(&mut self, text: &str, cursor: usize) {
        let hash = content_hash(text);
        if let Some(last) = self.undo_stack.last()
            && last.hash == hash
        {
            trace!(target: "buffer.undo", undo_depth = self.undo_stack.len(), hash, "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(Snapshot::capture(text, cursor));
        trace!(target: "buffer.undo", undo_depth = self.undo_stack.len(), hash, "push_snapshot");
        if self.undo_stack.len() > HISTORY_MAX {
            let _ = self.undo_stack.remove(0);
            trace!(target: "buffer.undo", "undo_stack_trimmed");
        }
        self.redo_stack.clear();
    }

    /// Pop the newest snapshot, stashing the current state for redo.
    pub(crate) fn undo(&mut self, current_text: &str, current_cursor: usize) -> Option<Snapshot> {
        let snap = self.undo_stack.pop()?;
        trace!(target: "buffer.undo", undo_depth = self.undo_stack.len(), "undo_pop");
        self.redo_stack
            .push(Snapshot::capture(current_text, current_cursor));
        Some(snap)
    }

    /// Pop the newest redo entry, stashing the current state for undo.
    pub(crate) fn redo(&mut self, current_text: &str, current_cursor: usize) -> Option<Snapshot> {
        let snap = self.redo_stack.pop()?;
        trace!(target: "buffer.undo", redo_depth = self.redo_stack.len(), "redo_pop");
        self.undo_stack
            .push(Snapshot::capture(current_text, current_cursor));
        Some(snap)
    }
}

fn content_hash(text: &str) -> u64 {
    let mut h = DefaultHasher::new();
    h.write(text.as_bytes());
    h.finish()
}
