use anyhow::{Context, Result};
use std::path::PathBuf;

use slotvault::BackupKey;

use crate::key;

pub fn exec(
    store: Option<PathBuf>,
    session: String,
    backup_key: BackupKey,
    ignore: Vec<String>,
) -> Result<()> {
    let root = key::storage_root(store)?;
    let ignores = key::extra_ignores(ignore);
    let r = slotvault::rehash_backup(&root, &session, &backup_key, &ignores)
        .with_context(|| format!("rehash backup in session {session}"))?;
    println!("rehash: id={} hash={}", r.backup_id, r.contents_hash);
    Ok(())
}
