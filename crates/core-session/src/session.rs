//! One open document: buffer, style map, optional backing file.

use crate::error::SessionError;
use crate::ui::Prompter;
use core_buffer::TextBuffer;
use core_highlight::{HighlightProfile, StyleMap, apply_profile};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Placeholder label for documents without a backing file.
pub const UNTITLED: &str = "untitled";

/// Marker appended to the label while the document has unsaved changes.
pub const DIRTY_MARKER: char = '*';

/// Outcome of a user-initiated save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The destination prompt was dismissed; nothing changed.
    Cancelled,
}

/// One open document. The session exclusively owns its buffer and styles;
/// `file_path` is `None` for a document that has never been saved.
#[derive(Debug)]
pub struct DocumentSession {
    buffer: TextBuffer,
    styles: StyleMap,
    file_path: Option<PathBuf>,
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new_untitled()
    }
}

impl DocumentSession {
    /// A fresh unsaved document with an empty buffer.
    pub fn new_untitled() -> Self {
        Self {
            buffer: TextBuffer::new(),
            styles: StyleMap::new(),
            file_path: None,
        }
    }

    /// Load `path` as UTF-8 text into a new saved-state session. When the
    /// extension is in `highlight_extensions` the source-code profile is
    /// applied once, at creation; edits do not re-lex. On any read or decode
    /// failure no session is created.
    pub fn open(path: &Path, highlight_extensions: &[String]) -> Result<Self, SessionError> {
        let content = fs::read_to_string(path).map_err(|source| {
            error!(target: "session.io", path = %path.display(), %source, "file_open_error");
            match source.kind() {
                ErrorKind::InvalidData => SessionError::Decode {
                    path: path.to_path_buf(),
                },
                _ => SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            }
        })?;
        let buffer = TextBuffer::from_text(&content);
        let mut styles = StyleMap::new();
        if let Some(profile) = HighlightProfile::for_path(path, highlight_extensions) {
            apply_profile(&buffer, &mut styles, &profile);
        }
        info!(target: "session.io", path = %path.display(), bytes = content.len(), "file_opened");
        Ok(Self {
            buffer,
            styles,
            file_path: Some(path.to_path_buf()),
        })
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }

    /// Split borrow for callers that mutate text and styling together.
    pub fn buffer_and_styles_mut(&mut self) -> (&mut TextBuffer, &mut StyleMap) {
        (&mut self.buffer, &mut self.styles)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Whether buffer content differs from the last saved/loaded state.
    /// Always re-derived from the buffer's own flag.
    pub fn modified(&self) -> bool {
        self.buffer.modified()
    }

    /// Display name: the backing file's base name (or [`UNTITLED`]), with a
    /// trailing [`DIRTY_MARKER`] while unsaved changes exist. Recomputed on
    /// every call, so the marker can never duplicate or go stale.
    pub fn label(&self) -> String {
        let base = self
            .file_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or(UNTITLED);
        if self.modified() {
            format!("{base}{DIRTY_MARKER}")
        } else {
            base.to_string()
        }
    }

    /// Save to the backing file, prompting for a destination when there is
    /// none. A dismissed prompt aborts with no state change. On success the
    /// buffer is marked clean and the (possibly new) path becomes the
    /// backing file.
    pub fn save(&mut self, prompter: &mut dyn Prompter) -> Result<SaveOutcome, SessionError> {
        let path = match self.file_path.clone() {
            Some(p) => p,
            None => match prompter.prompt_save_path() {
                Some(p) => p,
                None => return Ok(SaveOutcome::Cancelled),
            },
        };
        self.write_to(&path)?;
        self.file_path = Some(path);
        self.buffer.clear_modified();
        Ok(SaveOutcome::Saved)
    }

    /// Timer-driven save: same write-and-clear-dirty as [`save`], but never
    /// prompts. Callers must only invoke this on sessions with a backing
    /// file; without one this is a no-op.
    ///
    /// [`save`]: DocumentSession::save
    pub fn autosave(&mut self) -> Result<(), SessionError> {
        let Some(path) = self.file_path.clone() else {
            return Ok(());
        };
        self.write_to(&path)?;
        self.buffer.clear_modified();
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), SessionError> {
        fs::write(path, self.buffer.text()).map_err(|source| {
            error!(target: "session.io", path = %path.display(), %source, "file_write_error");
            SessionError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(target: "session.io", path = %path.display(), bytes = self.buffer.len(), "file_written");
        Ok(())
    }
}
