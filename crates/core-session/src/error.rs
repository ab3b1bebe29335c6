//! Failure taxonomy for document I/O.
//!
//! Dialog dismissal is deliberately absent: cancellation is modeled as
//! `Option::None` from the prompting collaborator and is always a silent
//! no-op, never an error. "Not found" search feedback likewise travels over
//! the notifier, not this type.

use std::path::PathBuf;
use thiserror::Error;

/// An I/O or decode failure while opening or saving a document. Surfaced to
/// the user at the point of occurrence; never propagates as a process fault.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8 text")]
    Decode { path: PathBuf },
}
