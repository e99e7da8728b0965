//! backup — create/restore/delete/describe/rehash flows.
//!
//! Create is check-then-act: hash the source, ask the store for an existing
//! backup with the same digest (dedup guard), and only then materialize.
//! Materialization is one function: copy tree + write metadata, and any
//! failure removes the partial directory, so a crash mid-copy can leave at
//! worst a directory without backup.meta — which the store reads as "not a
//! backup" and skips.
//!
//! Every mutating flow holds the exclusive storage-root lock (see lock.rs).

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::digest::hash_directory;
use crate::error::{Result, VaultError};
use crate::ignore::IgnoreSet;
use crate::lock::acquire_exclusive;
use crate::record::{write_record, SnapshotRecord, BACKUP_META_FILE};
use crate::resolve::{resolve, BackupKey};
use crate::store::{backup_dir, find_by_hash, list_all};
use crate::util::{copy_dir_tree, now_stamp};

/// Outcome of a create request. A dedup hit is a normal result, not an error:
/// repeated backups of unchanged content never grow the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A new backup was materialized.
    Created(SnapshotRecord),
    /// Content already backed up; the existing record is returned.
    Unchanged(SnapshotRecord),
}

impl BackupOutcome {
    pub fn record(&self) -> &SnapshotRecord {
        match self {
            BackupOutcome::Created(r) | BackupOutcome::Unchanged(r) => r,
        }
    }
}

/// Ignore set used for every store-side digest: the backup's own metadata
/// file, plus caller extras.
pub fn store_ignores(extra: &[String]) -> Result<IgnoreSet> {
    let mut raws: Vec<String> = vec![format!("/{}", BACKUP_META_FILE)];
    raws.extend(extra.iter().cloned());
    IgnoreSet::compile(&raws)
}

/// Back up `source` under `session_id`.
pub fn create_backup(
    storage_root: &Path,
    session_id: &str,
    source: &Path,
    description: &str,
    extra_ignores: &[String],
) -> Result<BackupOutcome> {
    let ignores = store_ignores(extra_ignores)?;
    fs::create_dir_all(storage_root)
        .map_err(|e| VaultError::io(format!("create {}", storage_root.display()), e))?;
    let _lock = acquire_exclusive(storage_root)?;

    let digest = hash_directory(source, &ignores)?;

    if let Some(existing) = find_by_hash(storage_root, session_id, &digest)? {
        info!(
            "content {} already backed up as {} (session {})",
            existing.short_hash(),
            existing.backup_id,
            session_id
        );
        return Ok(BackupOutcome::Unchanged(existing));
    }

    // Ids have second resolution; a second request within the same second
    // would reuse an existing backup's directory. Wait out the clock for the
    // next free stamp instead of merging into it. Bounded: at most one tick.
    let mut backup_id = now_stamp();
    while storage_root.join(format!("{session_id}_{backup_id}")).exists() {
        thread::sleep(Duration::from_millis(50));
        backup_id = now_stamp();
    }

    let record = SnapshotRecord {
        session_id: session_id.to_string(),
        backup_id,
        contents_hash: digest,
        description: description.to_string(),
    };
    let dir = backup_dir(storage_root, &record);

    materialize(source, &dir, &record)?;
    info!(
        "created backup {} ({}) for session {}",
        record.backup_id,
        record.short_hash(),
        session_id
    );
    Ok(BackupOutcome::Created(record))
}

/// Copy + metadata write as one step, with partial-directory cleanup.
/// Never merges into an existing directory: that would silently destroy the
/// earlier backup and leave its recorded hash pointing at a mixed tree.
fn materialize(source: &Path, dir: &Path, record: &SnapshotRecord) -> Result<()> {
    if dir.exists() {
        return Err(VaultError::AlreadyExists(dir.to_path_buf()));
    }
    let res = copy_dir_tree(source, dir, None).and_then(|()| write_record(dir, record));
    if let Err(e) = res {
        warn!("materialize {} failed, removing partial dir: {e}", dir.display());
        if let Err(rm) = fs::remove_dir_all(dir) {
            if rm.kind() != std::io::ErrorKind::NotFound {
                warn!("cleanup of {} failed: {rm}", dir.display());
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Restore the backup matching `key` over `target`: the existing target tree
/// is replaced by the backup's contents, minus the metadata file.
pub fn restore_backup(
    storage_root: &Path,
    session_id: &str,
    key: &BackupKey,
    target: &Path,
) -> Result<SnapshotRecord> {
    let _lock = acquire_exclusive(storage_root)?;
    let records = list_all(storage_root)?;
    let record = resolve(&records, session_id, key)?.clone();
    let dir = backup_dir(storage_root, &record);

    if target.exists() {
        fs::remove_dir_all(target)
            .map_err(|e| VaultError::io(format!("remove {}", target.display()), e))?;
    }
    copy_dir_tree(&dir, target, Some(BACKUP_META_FILE))?;
    info!(
        "restored backup {} ({}) into {}",
        record.backup_id,
        record.short_hash(),
        target.display()
    );
    Ok(record)
}

/// Delete the backup matching `key`: backing directory removed entirely,
/// metadata and content together. No soft-delete.
pub fn delete_backup(
    storage_root: &Path,
    session_id: &str,
    key: &BackupKey,
) -> Result<SnapshotRecord> {
    let _lock = acquire_exclusive(storage_root)?;
    let records = list_all(storage_root)?;
    let record = resolve(&records, session_id, key)?.clone();
    let dir = backup_dir(storage_root, &record);

    fs::remove_dir_all(&dir)
        .map_err(|e| VaultError::io(format!("remove {}", dir.display()), e))?;
    info!("deleted backup {} (session {})", record.backup_id, session_id);
    Ok(record)
}

/// Replace the description of the backup matching `key`. Full metadata
/// overwrite, per the record format contract.
pub fn set_description(
    storage_root: &Path,
    session_id: &str,
    key: &BackupKey,
    description: &str,
) -> Result<SnapshotRecord> {
    let _lock = acquire_exclusive(storage_root)?;
    let records = list_all(storage_root)?;
    let mut record = resolve(&records, session_id, key)?.clone();
    record.description = description.to_string();
    write_record(&backup_dir(storage_root, &record), &record)?;
    Ok(record)
}

/// Recompute the digest of the backing directory (metadata file excluded) and
/// persist it. Needed after any out-of-band edit of the backup's contents.
pub fn rehash_backup(
    storage_root: &Path,
    session_id: &str,
    key: &BackupKey,
    extra_ignores: &[String],
) -> Result<SnapshotRecord> {
    let ignores = store_ignores(extra_ignores)?;
    let _lock = acquire_exclusive(storage_root)?;
    let records = list_all(storage_root)?;
    let mut record = resolve(&records, session_id, key)?.clone();
    let dir = backup_dir(storage_root, &record);

    let digest = hash_directory(&dir, &ignores)?;
    if digest == record.contents_hash {
        debug!("rehash {}: unchanged", record.backup_id);
        return Ok(record);
    }
    record.contents_hash = digest;
    // Directory name carries (session_id, backup_id) only, so it is unaffected.
    write_record(&dir, &record)?;
    info!(
        "rehash {}: contents hash now {}",
        record.backup_id,
        record.short_hash()
    );
    Ok(record)
}
