//! Collaborator seams for the surrounding UI toolkit.
//!
//! The core never talks to a dialog or message box directly; it asks a
//! [`Prompter`] for paths and text (all cancellable) and pushes user-visible
//! feedback through a [`Notifier`]. Front-ends implement these over whatever
//! chrome they have.

use std::path::PathBuf;

/// User's answer to the unsaved-changes question at exit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitChoice {
    Save,
    Discard,
    Cancel,
}

/// Cancellable user prompts. `None` always means the user dismissed the
/// dialog, and the triggering operation must abort with no side effects.
pub trait Prompter {
    fn prompt_open_path(&mut self) -> Option<PathBuf>;
    fn prompt_save_path(&mut self) -> Option<PathBuf>;
    fn prompt_text(&mut self, label: &str) -> Option<String>;
    fn confirm_exit(&mut self) -> ExitChoice;
}

/// One-way user feedback.
pub trait Notifier {
    /// Informational notice ("not found", autosave summary).
    fn notify(&mut self, message: &str);
    /// Failure notice (unreadable file, failed save). Blocking presentation
    /// is the front-end's choice.
    fn notify_error(&mut self, message: &str);
}
