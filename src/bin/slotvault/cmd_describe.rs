use anyhow::{Context, Result};
use std::path::PathBuf;

use slotvault::BackupKey;

use crate::key;

pub fn exec(
    store: Option<PathBuf>,
    session: String,
    backup_key: BackupKey,
    text: String,
) -> Result<()> {
    let root = key::storage_root(store)?;
    let r = slotvault::set_description(&root, &session, &backup_key, &text)
        .with_context(|| format!("describe backup in session {session}"))?;
    println!("describe: OK (id={} \"{}\")", r.backup_id, r.description);
    Ok(())
}
