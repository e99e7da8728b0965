//! record — the snapshot metadata entity and its on-disk form.
//!
//! A directory is a backup iff it contains `backup.meta` at its top level.
//! The file is a flat key/value section:
//!
//!   [backup]
//!   session_id = 20230518-231856
//!   backup_id = 20230520-174107
//!   contents_hash = a88d24d...
//!   description = before the bridge
//!
//! Exactly those four keys; anything missing, extra or duplicated is
//! MalformedMetadata. `write_record` is always a full overwrite (tmp+rename),
//! never a partial patch.
//!
//! The 7-char short hash is derived from `contents_hash` on demand and never
//! serialized, so it cannot drift.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::digest::HASH_HEX_LEN;
use crate::error::{Result, VaultError};

/// Fixed metadata filename inside every backup directory.
pub const BACKUP_META_FILE: &str = "backup.meta";

/// Short-hash prefix length.
pub const SHORT_HASH_LEN: usize = 7;

const META_SECTION: &str = "[backup]";
const META_KEYS: [&str; 4] = ["session_id", "backup_id", "contents_hash", "description"];

/// One stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRecord {
    /// Grouping key (`YYYYMMDD-HHMMSS`, extracted from game state upstream).
    pub session_id: String,
    /// Creation-time id, same format, wall clock at second resolution.
    pub backup_id: String,
    /// Lowercase hex SHA-1 of the backing directory (metadata file excluded).
    pub contents_hash: String,
    /// Free text, may be empty, mutable after creation.
    pub description: String,
}

impl SnapshotRecord {
    /// First 7 chars of `contents_hash`. Computed, never stored.
    pub fn short_hash(&self) -> &str {
        &self.contents_hash[..SHORT_HASH_LEN.min(self.contents_hash.len())]
    }

    /// Conventional backing-directory name: `{session_id}_{backup_id}`.
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.session_id, self.backup_id)
    }
}

/// Does `dir` hold a backup (metadata file present)?
pub fn is_backup_dir(dir: &Path) -> bool {
    dir.join(BACKUP_META_FILE).is_file()
}

/// Parse the metadata file inside `dir`.
pub fn read_record(dir: &Path) -> Result<SnapshotRecord> {
    let path = dir.join(BACKUP_META_FILE);
    if !path.is_file() {
        return Err(VaultError::NotABackup {
            dir: dir.to_path_buf(),
        });
    }
    let text =
        fs::read_to_string(&path).map_err(|e| VaultError::io(format!("read {}", path.display()), e))?;

    let malformed = |reason: String| VaultError::MalformedMetadata {
        dir: dir.to_path_buf(),
        reason,
    };

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    match lines.next() {
        Some(l) if l.trim() == META_SECTION => {}
        other => {
            return Err(malformed(format!(
                "expected section header {}, got {:?}",
                META_SECTION, other
            )))
        }
    }

    let mut fields: Vec<(String, String)> = Vec::new();
    for line in lines {
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| malformed(format!("not a key/value line: {line:?}")))?;
        let key = key.trim_end().to_string();
        // One space after '=' belongs to the separator; the rest is the value.
        let value = value.strip_prefix(' ').unwrap_or(value).to_string();
        if !META_KEYS.contains(&key.as_str()) {
            return Err(malformed(format!("unexpected key '{key}'")));
        }
        if fields.iter().any(|(k, _)| *k == key) {
            return Err(malformed(format!("duplicate key '{key}'")));
        }
        fields.push((key, value));
    }
    if fields.len() != META_KEYS.len() {
        let missing: Vec<&str> = META_KEYS
            .iter()
            .copied()
            .filter(|k| !fields.iter().any(|(fk, _)| fk == k))
            .collect();
        return Err(malformed(format!("missing keys: {}", missing.join(", "))));
    }

    let get = |k: &str| -> String {
        fields
            .iter()
            .find(|(fk, _)| fk == k)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };

    let contents_hash = get("contents_hash");
    if contents_hash.len() != HASH_HEX_LEN
        || !contents_hash
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return Err(malformed(format!(
            "contents_hash must be {HASH_HEX_LEN} lowercase hex chars, got '{contents_hash}'"
        )));
    }

    Ok(SnapshotRecord {
        session_id: get("session_id"),
        backup_id: get("backup_id"),
        contents_hash,
        description: get("description"),
    })
}

/// Serialize `record` into `dir`, overwriting any existing metadata file.
///
/// The format is line-based, so a field containing a line break would come
/// back as MalformedMetadata on every subsequent read; such values are
/// rejected here instead of being written.
pub fn write_record(dir: &Path, record: &SnapshotRecord) -> Result<()> {
    let path = dir.join(BACKUP_META_FILE);
    // The tmp name keeps the metadata prefix, so the digest ignore pattern
    // also covers a crash leftover, and no stored save file can collide.
    let tmp = dir.join(format!("{BACKUP_META_FILE}.tmp"));

    let mut text = String::new();
    text.push_str(META_SECTION);
    text.push('\n');
    for (key, value) in [
        ("session_id", &record.session_id),
        ("backup_id", &record.backup_id),
        ("contents_hash", &record.contents_hash),
        ("description", &record.description),
    ] {
        if value.contains('\n') || value.contains('\r') {
            return Err(VaultError::MalformedMetadata {
                dir: dir.to_path_buf(),
                reason: format!("{key} must be a single line"),
            });
        }
        text.push_str(key);
        text.push_str(" = ");
        text.push_str(value);
        text.push('\n');
    }

    {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|e| VaultError::io(format!("open tmp {}", tmp.display()), e))?;
        f.write_all(text.as_bytes())
            .map_err(|e| VaultError::io(format!("write {}", tmp.display()), e))?;
        let _ = f.sync_all();
    }
    fs::rename(&tmp, &path).map_err(|e| {
        VaultError::io(format!("rename {} -> {}", tmp.display(), path.display()), e)
    })?;
    Ok(())
}
