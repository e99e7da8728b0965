//! Advisory locking for single-writer safety on a storage root.
//!
//! Every check-then-act sequence (dedup check + copy + metadata write;
//! resolve + delete; description edits; rehash) holds an exclusive fs2 lock
//! on `<storage_root>/vault.lock` so two slotvault processes cannot interleave.
//! The lock is released on Drop.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Result, VaultError};

pub const LOCK_FILE: &str = "vault.lock";

pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Unlock errors on drop are ignored; the OS releases on close anyway.
        let _ = self.file.unlock();
    }
}

/// Acquire the exclusive storage-root lock. Blocks until acquired.
/// The storage root must exist (callers create it first).
pub fn acquire_exclusive(storage_root: &Path) -> Result<LockGuard> {
    let path = storage_root.join(LOCK_FILE);
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .map_err(|e| VaultError::io(format!("open lock file {}", path.display()), e))?;
    file.lock_exclusive()
        .map_err(|e| VaultError::io(format!("lock_exclusive {}", path.display()), e))?;
    Ok(LockGuard { file, path })
}
