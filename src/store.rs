//! store — enumeration of backups under a storage root.
//!
//! Layout: one subdirectory per backup, named `{session_id}_{backup_id}`,
//! each holding the copied save tree plus `backup.meta` at its top level.
//!
//! A missing storage root is the normal "no backups yet" state and reads as
//! empty, not as an error. Subdirectories without a metadata file (including
//! half-materialized ones) are silently skipped; a metadata file that is
//! present but broken surfaces as MalformedMetadata.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VaultError};
use crate::record::{is_backup_dir, read_record, SnapshotRecord};

/// All backups under `storage_root`, sorted by `(session_id, backup_id)`
/// ascending. This is the display/selection order used everywhere.
pub fn list_all(storage_root: &Path) -> Result<Vec<SnapshotRecord>> {
    if !storage_root.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    let iter = fs::read_dir(storage_root)
        .map_err(|e| VaultError::io(format!("read_dir {}", storage_root.display()), e))?;
    for entry in iter {
        let entry = entry
            .map_err(|e| VaultError::io(format!("read_dir {}", storage_root.display()), e))?;
        let path = entry.path();
        if !path.is_dir() || !is_backup_dir(&path) {
            continue;
        }
        out.push(read_record(&path)?);
    }
    out.sort_by(|a, b| {
        (a.session_id.as_str(), a.backup_id.as_str())
            .cmp(&(b.session_id.as_str(), b.backup_id.as_str()))
    });
    Ok(out)
}

/// Distinct session ids, ascending.
pub fn list_sessions(storage_root: &Path) -> Result<Vec<String>> {
    let mut sessions: Vec<String> = list_all(storage_root)?
        .into_iter()
        .map(|r| r.session_id)
        .collect();
    sessions.dedup(); // list_all is already session-sorted
    Ok(sessions)
}

/// Backups of one session, in `backup_id` order.
pub fn list_for_session(storage_root: &Path, session_id: &str) -> Result<Vec<SnapshotRecord>> {
    Ok(list_all(storage_root)?
        .into_iter()
        .filter(|r| r.session_id == session_id)
        .collect())
}

/// Dedup Guard query: an existing backup of `session_id` whose contents hash
/// equals `digest`, if any.
pub fn find_by_hash(
    storage_root: &Path,
    session_id: &str,
    digest: &str,
) -> Result<Option<SnapshotRecord>> {
    Ok(list_for_session(storage_root, session_id)?
        .into_iter()
        .find(|r| r.contents_hash == digest))
}

/// Backing directory of a record.
pub fn backup_dir(storage_root: &Path, record: &SnapshotRecord) -> PathBuf {
    storage_root.join(record.dir_name())
}
