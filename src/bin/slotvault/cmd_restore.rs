use anyhow::{Context, Result};
use std::path::PathBuf;

use slotvault::BackupKey;

use crate::key;

pub fn exec(
    store: Option<PathBuf>,
    session: String,
    backup_key: BackupKey,
    target: PathBuf,
) -> Result<()> {
    let root = key::storage_root(store)?;
    let r = slotvault::restore_backup(&root, &session, &backup_key, &target)
        .with_context(|| format!("restore into {}", target.display()))?;
    println!(
        "restore: id={} hash={} -> {}",
        r.backup_id,
        r.short_hash(),
        target.display()
    );
    Ok(())
}
