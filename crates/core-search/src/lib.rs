//! Find / find-next / replace-all over the active document session.
//!
//! The controller owns a single [`SearchState`] shared across tabs (the term
//! and resume offset survive a tab switch; see DESIGN.md) and re-resolves the
//! active session on every call, so it always operates on whatever tab the
//! user is looking at. All matching is literal: user input is regex-escaped
//! before compilation.

use core_highlight::{clear_matches, highlight_matches, literal_regex};
use core_session::{Notifier, SessionManager};
use tracing::{debug, trace};

pub const NOT_FOUND_MESSAGE: &str = "Text not found.";

/// Last-used search term and the forward-resume offset for find-next.
///
/// Invariant: `resume` resets to 0 when a new term is stored, and only then.
/// Between find-next calls it advances to just past the last hit, which is
/// what makes wrap-around cycling work.
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    term: String,
    resume: usize,
}

impl SearchState {
    /// Empty term means "no active search".
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn resume(&self) -> usize {
        self.resume
    }
}

/// Orchestrates search actions against the session manager's active tab.
#[derive(Default)]
pub struct SearchController {
    state: SearchState,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a new search: store the term, reset the resume offset, replace
    /// any previous match highlights with highlights for every
    /// case-insensitive occurrence, and select the first one. Zero matches
    /// produce a "not found" notification. An empty term is a no-op.
    pub fn find(&mut self, sessions: &mut SessionManager, term: &str, notifier: &mut dyn Notifier) {
        if term.is_empty() {
            return;
        }
        let Some(session) = sessions.active_session_mut() else {
            return;
        };
        self.state.term = term.to_string();
        self.state.resume = 0;
        let (buffer, styles) = session.buffer_and_styles_mut();
        clear_matches(styles);
        let first = highlight_matches(buffer, styles, term);
        debug!(target: "search", term, found = first.is_some(), "find");
        if first.is_none() {
            notifier.notify(NOT_FOUND_MESSAGE);
        }
    }

    /// Jump to the next occurrence of the stored term, scanning forward from
    /// the resume offset and wrapping to the start once. A second miss after
    /// the wrap means the term is absent: notify and stop (never loops). With
    /// no stored term this is a no-op, there is nothing to repeat.
    pub fn find_next(&mut self, sessions: &mut SessionManager, notifier: &mut dyn Notifier) {
        if self.state.term.is_empty() {
            return;
        }
        let Some(session) = sessions.active_session_mut() else {
            return;
        };
        let buffer = session.buffer_mut();
        let pattern = literal_regex(&self.state.term, true);
        // The buffer may have shrunk (or belong to another tab) since the
        // offset was stored.
        let from = clamp_boundary(buffer.text(), self.state.resume.min(buffer.len()));
        let hit = pattern
            .find_at(buffer.text(), from)
            .or_else(|| pattern.find(buffer.text()))
            .map(|m| (m.start(), m.end()));
        match hit {
            Some((start, end)) => {
                buffer.select(start, end);
                self.state.resume = end;
                trace!(target: "search", start, end, "find_next_hit");
            }
            None => {
                trace!(target: "search", term = %self.state.term, "find_next_miss");
                notifier.notify(NOT_FOUND_MESSAGE);
            }
        }
    }

    /// Replace every case-sensitive literal occurrence of `find` with
    /// `replace` across the whole active buffer, as one atomic, singly
    /// undoable edit. Empty `find` aborts; empty `replace` deletes all
    /// occurrences. When nothing matches the buffer is left untouched (no
    /// undo entry, modified flag unchanged).
    pub fn replace_all(&mut self, sessions: &mut SessionManager, find: &str, replace: &str) {
        if find.is_empty() {
            return;
        }
        let Some(session) = sessions.active_session_mut() else {
            return;
        };
        let buffer = session.buffer_mut();
        let replaced = buffer.text().replace(find, replace);
        if replaced == buffer.text() {
            debug!(target: "search", find, "replace_all_no_occurrences");
            return;
        }
        buffer.edit_batch(|b| b.set_text(&replaced));
        debug!(target: "search", find, replace, len = replaced.len(), "replace_all");
    }
}

/// Largest char boundary at or before `offset`.
fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut off = offset.min(text.len());
    while off > 0 && !text.is_char_boundary(off) {
        off -= 1;
    }
    off
}
