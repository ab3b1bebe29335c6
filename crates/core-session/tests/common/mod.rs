#![allow(dead_code)] // Shared across integration tests; each binary uses a subset.

use core_session::{ExitChoice, Notifier, Prompter};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Scripted prompter: answers are queued up front, `None` simulates the user
/// dismissing the dialog.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub save_paths: VecDeque<Option<PathBuf>>,
    pub texts: VecDeque<Option<String>>,
    pub exit_choice: Option<ExitChoice>,
}

impl ScriptedPrompter {
    pub fn with_save_path(path: PathBuf) -> Self {
        let mut p = Self::default();
        p.save_paths.push_back(Some(path));
        p
    }

    pub fn cancelling() -> Self {
        let mut p = Self::default();
        p.save_paths.push_back(None);
        p.open_paths.push_back(None);
        p.texts.push_back(None);
        p
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn prompt_save_path(&mut self) -> Option<PathBuf> {
        self.save_paths.pop_front().flatten()
    }

    fn prompt_text(&mut self, _label: &str) -> Option<String> {
        self.texts.pop_front().flatten()
    }

    fn confirm_exit(&mut self) -> ExitChoice {
        self.exit_choice.unwrap_or(ExitChoice::Cancel)
    }
}

/// Notifier that records everything it is told.
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Vec<String>,
    pub errors: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
