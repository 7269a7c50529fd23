//! Error types for questgrace-core.
//!
//! The grace-period domain itself has no error taxonomy: absent host
//! references and malformed settings lines are ordinary state handled by
//! clearing or skipping. Errors exist only at the I/O edge.

use std::path::PathBuf;
use thiserror::Error;

/// Settings-file errors. A missing file is not an error (built-in defaults
/// apply); an existing but unreadable file is.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
