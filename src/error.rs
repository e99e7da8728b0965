//! Error taxonomy for the slotvault core.
//!
//! Structured variants so callers can tell "no match" from "broken metadata"
//! from plain I/O trouble. A dedup hit is not an error (see backup::BackupOutcome).
//! Nothing here retries; every failure is terminal for the operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    /// Source directory handed to the digest engine does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Directory lacks the metadata file, so it is not a backup at all.
    #[error("not a backup directory (no {}): {}", crate::record::BACKUP_META_FILE, .dir.display())]
    NotABackup { dir: PathBuf },

    /// Metadata file is present but does not parse to exactly the four fields.
    #[error("malformed metadata in {}: {reason}", .dir.display())]
    MalformedMetadata { dir: PathBuf, reason: String },

    /// Backup directory already present; refusing to merge into it.
    #[error("backup directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// No backup in the session matches the supplied key.
    #[error("no backup in session {session} matches {kind} '{value}'")]
    NoMatch {
        session: String,
        kind: &'static str,
        value: String,
    },

    /// More than one backup matches; the caller must supply a longer key.
    #[error("{count} backups in session {session} match {kind} '{value}'")]
    Ambiguous {
        session: String,
        kind: &'static str,
        value: String,
        count: usize,
    },

    /// Ignore pattern did not compile.
    #[error("bad ignore pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl VaultError {
    /// I/O error with a human-readable context, mirroring anyhow's with_context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        VaultError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
