use anyhow::{Context, Result};
use std::path::PathBuf;

use slotvault::BackupKey;

use crate::key;

pub fn exec(store: Option<PathBuf>, session: String, backup_key: BackupKey) -> Result<()> {
    let root = key::storage_root(store)?;
    let r = slotvault::delete_backup(&root, &session, &backup_key)
        .with_context(|| format!("delete backup in session {session}"))?;
    println!("delete: OK (id={} session={})", r.backup_id, r.session_id);
    Ok(())
}
