//! Editable text buffer: whole-text access, byte-offset cursor/selection,
//! a modified flag, and snapshot-based undo/redo.
//!
//! Offsets throughout are UTF-8 byte offsets into the buffer text and are
//! clamped to character boundaries at every mutation point, so callers can
//! hand in stale offsets (after an edit shrank the buffer) without panicking.
//!
//! Undo granularity: each mutating call pushes one history snapshot unless it
//! runs inside [`TextBuffer::edit_batch`], which captures exactly one snapshot
//! for the whole scope regardless of how many edits happen inside it. Batch
//! scoping is closure-based so the single-entry guarantee holds on every exit
//! path, including early returns.

pub mod undo;

use tracing::trace;
use undo::UndoEngine;
pub use undo::{HISTORY_MAX, Snapshot};

/// An editable text buffer with cursor, selection and edit history.
#[derive(Default, Debug)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    selection: Option<(usize, usize)>,
    modified: bool,
    history: UndoEngine,
    batch_depth: u32,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a buffer holding `content`, unmodified, cursor at 0.
    pub fn from_text(content: &str) -> Self {
        Self {
            text: content.to_string(),
            ..Self::default()
        }
    }

    /// Full buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the entire buffer content. Records one undo snapshot (or none
    /// when inside a batch), marks the buffer modified, and re-clamps the
    /// cursor and selection to the new text.
    pub fn set_text(&mut self, content: &str) {
        self.snapshot();
        self.text.clear();
        self.text.push_str(content);
        self.cursor = clamp_to_boundary(&self.text, self.cursor);
        self.selection = None;
        self.modified = true;
        trace!(target: "buffer", len = self.text.len(), "set_text");
    }

    /// Insert `s` at the cursor and advance the cursor past it.
    pub fn insert(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.snapshot();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.selection = None;
        self.modified = true;
        trace!(target: "buffer", inserted = s.len(), cursor = self.cursor, "insert");
    }

    /// Cursor position (byte offset, always on a character boundary).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping to the buffer length and the nearest
    /// character boundary at or before the requested offset. Clears any
    /// selection.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = clamp_to_boundary(&self.text, offset);
        self.selection = None;
    }

    /// Select the byte range `[start, end)` and place the cursor at its end.
    /// Both offsets are clamped; an empty (or inverted) range clears the
    /// selection instead.
    pub fn select(&mut self, start: usize, end: usize) {
        let s = clamp_to_boundary(&self.text, start);
        let e = clamp_to_boundary(&self.text, end);
        if s < e {
            self.selection = Some((s, e));
            self.cursor = e;
        } else {
            self.selection = None;
            self.cursor = s;
        }
    }

    /// Active selection as a half-open byte range, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Whether the content has changed since the last [`clear_modified`].
    ///
    /// [`clear_modified`]: TextBuffer::clear_modified
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Mark the buffer clean. Called after a successful save or load.
    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Run `f` as a single undoable edit: exactly one history snapshot is
    /// captured up front and every mutation inside the closure coalesces into
    /// it. Nesting is permitted; only the outermost batch snapshots.
    pub fn edit_batch<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        if self.batch_depth == 0 {
            self.snapshot();
        }
        self.batch_depth += 1;
        let out = f(self);
        self.batch_depth -= 1;
        out
    }

    /// Revert to the previous snapshot. Returns false when history is empty.
    pub fn undo(&mut self) -> bool {
        let Some(snap) = self.history.undo(&self.text, self.cursor) else {
            return false;
        };
        self.restore(snap);
        true
    }

    /// Re-apply the last undone snapshot. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snap) = self.history.redo(&self.text, self.cursor) else {
            return false;
        };
        self.restore(snap);
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    fn restore(&mut self, snap: Snapshot) {
        self.text = snap.text;
        self.cursor = clamp_to_boundary(&self.text, snap.cursor);
        self.selection = None;
        self.modified = true;
    }

    fn snapshot(&mut self) {
        if self.batch_depth > 0 {
            return;
        }
        self.history.push(&self.text, self.cursor);
    }
}

/// Largest character boundary at or before `offset`, clamped to `text.len()`.
fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut off = offset.min(text.len());
    while off > 0 && !text.is_char_boundary(off) {
        off -= 1;
    }
    off
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_text_starts_clean() {
        let b = TextBuffer::from_text("hello");
        assert_eq!(b.text(), "hello");
        assert!(!b.modified());
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn set_text_marks_modified_and_is_undoable() {
        let mut b = TextBuffer::from_text("one");
        b.set_text("two");
        assert!(b.modified());
        assert_eq!(b.text(), "two");
        assert!(b.undo());
        assert_eq!(b.text(), "one");
        assert!(b.redo());
        assert_eq!(b.text(), "two");
    }

    #[test]
    fn insert_advances_cursor() {
        let mut b = TextBuffer::from_text("ab");
        b.set_cursor(1);
        b.insert("XY");
        assert_eq!(b.text(), "aXYb");
        assert_eq!(b.cursor(), 3);
    }

    #[test]
    fn cursor_clamps_to_char_boundary() {
        let mut b = TextBuffer::from_text("aé"); // 'é' spans bytes 1..3
        b.set_cursor(2); // inside the multi-byte char
        assert_eq!(b.cursor(), 1);
        b.set_cursor(100);
        assert_eq!(b.cursor(), 3);
    }

    #[test]
    fn select_clamps_and_rejects_empty() {
        let mut b = TextBuffer::from_text("hello world");
        b.select(6, 11);
        assert_eq!(b.selection(), Some((6, 11)));
        assert_eq!(b.cursor(), 11);
        b.select(4, 4);
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn edit_batch_is_single_undo_entry() {
        let mut b = TextBuffer::from_text("start");
        b.edit_batch(|buf| {
            buf.set_text("middle");
            buf.set_text("end");
        });
        assert_eq!(b.text(), "end");
        assert_eq!(b.undo_depth(), 1);
        assert!(b.undo());
        assert_eq!(b.text(), "start");
        assert!(!b.undo(), "no further history");
    }

    #[test]
    fn nested_batches_still_snapshot_once() {
        let mut b = TextBuffer::from_text("a");
        b.edit_batch(|buf| {
            buf.set_text("b");
            buf.edit_batch(|inner| inner.set_text("c"));
        });
        assert_eq!(b.undo_depth(), 1);
        assert!(b.undo());
        assert_eq!(b.text(), "a");
    }

    #[test]
    fn undo_restores_cursor() {
        let mut b = TextBuffer::from_text("abcdef");
        b.set_cursor(3);
        b.set_text("x");
        assert!(b.undo());
        assert_eq!(b.cursor(), 3);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut b = TextBuffer::from_text("1");
        b.set_text("2");
        b.undo();
        assert_eq!(b.redo_depth(), 1);
        b.set_text("3");
        assert_eq!(b.redo_depth(), 0);
        assert!(!b.redo());
    }

    #[test]
    fn identical_snapshots_dedupe() {
        let mut b = TextBuffer::from_text("same");
        b.set_text("same");
        b.set_text("same");
        assert_eq!(b.undo_depth(), 1);
    }
}
