//! Document sessions and the tab collection that owns them.
//!
//! One [`DocumentSession`] per open tab: a text buffer, its style map, an
//! optional backing file path, and the save/open/autosave state machine.
//! [`SessionManager`] keeps the ordered tab list, the active index, and the
//! cross-tab operations (autosave sweep, shutdown check).
//!
//! Everything here is synchronous and single-threaded: saves and the autosave
//! sweep run inline on the caller's thread, blocking until done. Moving the
//! sweep to a background thread would require per-buffer locking first.

pub mod error;
pub mod session;
pub mod ui;

pub use error::SessionError;
pub use session::{DIRTY_MARKER, DocumentSession, SaveOutcome, UNTITLED};
pub use ui::{ExitChoice, Notifier, Prompter};

use std::path::Path;
use tracing::{debug, info};

/// Ordered collection of open documents (tab order) plus the active index.
///
/// Invariant: `active` indexes into `sessions` whenever `sessions` is
/// non-empty. Front-ends are expected to create at least one tab at startup.
#[derive(Default)]
pub struct SessionManager {
    sessions: Vec<DocumentSession>,
    active: usize,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fresh untitled session and make it active.
    pub fn new_tab(&mut self) -> &mut DocumentSession {
        self.sessions.push(DocumentSession::new_untitled());
        self.active = self.sessions.len() - 1;
        debug!(target: "session", tabs = self.sessions.len(), "new_tab");
        &mut self.sessions[self.active]
    }

    /// Open `path` in a new tab and make it active. On failure no session is
    /// created and the previously active tab stays active.
    pub fn open_file(
        &mut self,
        path: &Path,
        highlight_extensions: &[String],
    ) -> Result<&mut DocumentSession, SessionError> {
        let session = DocumentSession::open(path, highlight_extensions)?;
        self.sessions.push(session);
        self.active = self.sessions.len() - 1;
        debug!(target: "session", tabs = self.sessions.len(), path = %path.display(), "open_tab");
        Ok(&mut self.sessions[self.active])
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[DocumentSession] {
        &self.sessions
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch the active tab. Returns false (and changes nothing) for an
    /// out-of-range index.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.sessions.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// The currently edited document; `None` only when no tab exists.
    pub fn active_session(&self) -> Option<&DocumentSession> {
        self.sessions.get(self.active)
    }

    pub fn active_session_mut(&mut self) -> Option<&mut DocumentSession> {
        self.sessions.get_mut(self.active)
    }

    /// Close the tab at `index`, returning the removed session. The active
    /// index is clamped so it stays valid while any tab remains.
    pub fn close_tab(&mut self, index: usize) -> Option<DocumentSession> {
        if index >= self.sessions.len() {
            return None;
        }
        let removed = self.sessions.remove(index);
        if self.active >= self.sessions.len() && self.active > 0 {
            self.active = self.sessions.len() - 1;
        }
        debug!(target: "session", tabs = self.sessions.len(), "close_tab");
        Some(removed)
    }

    pub fn any_modified(&self) -> bool {
        self.sessions.iter().any(DocumentSession::modified)
    }

    /// Timer-driven sweep: save every session that has a backing file and
    /// unsaved changes. Sessions without a file path are skipped (they cannot
    /// be autosaved), as are clean ones. A failed write is reported and the
    /// sweep continues; the session stays dirty and will be attempted again
    /// on the next tick. Returns the number of sessions written.
    pub fn autosave_sweep(&mut self, notifier: &mut dyn Notifier) -> usize {
        let mut written = 0usize;
        for session in &mut self.sessions {
            if session.file_path().is_none() || !session.modified() {
                continue;
            }
            match session.autosave() {
                Ok(()) => written += 1,
                Err(e) => notifier.notify_error(&e.to_string()),
            }
        }
        if written > 0 {
            info!(target: "session.autosave", written, "autosave_sweep");
        }
        written
    }

    /// Pre-exit check. With no unsaved changes, exit proceeds silently.
    /// Otherwise the user chooses: Save persists only the *active* session
    /// (other dirty tabs stay dirty; long-standing asymmetry kept on purpose)
    /// and proceeds; Discard proceeds without saving; Cancel aborts the exit.
    /// Returns true when the process may exit.
    pub fn confirm_shutdown(
        &mut self,
        prompter: &mut dyn Prompter,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !self.any_modified() {
            return true;
        }
        match prompter.confirm_exit() {
            ExitChoice::Save => {
                if let Some(session) = self.active_session_mut() {
                    match session.save(prompter) {
                        Ok(_) => {}
                        Err(e) => notifier.notify_error(&e.to_string()),
                    }
                }
                true
            }
            ExitChoice::Discard => true,
            ExitChoice::Cancel => false,
        }
    }
}
