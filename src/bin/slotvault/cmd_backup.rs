use anyhow::{Context, Result};
use std::path::PathBuf;

use slotvault::BackupOutcome;

use crate::key;

pub fn exec(
    store: Option<PathBuf>,
    session: String,
    source: PathBuf,
    description: String,
    ignore: Vec<String>,
) -> Result<()> {
    let root = key::storage_root(store)?;
    let ignores = key::extra_ignores(ignore);

    let outcome = slotvault::create_backup(&root, &session, &source, &description, &ignores)
        .with_context(|| format!("backup {} into {}", source.display(), root.display()))?;

    match outcome {
        BackupOutcome::Created(r) => {
            println!("backup: id={} hash={} session={}", r.backup_id, r.short_hash(), r.session_id);
        }
        BackupOutcome::Unchanged(r) => {
            println!(
                "backup: unchanged, already stored as id={} hash={} session={}",
                r.backup_id,
                r.short_hash(),
                r.session_id
            );
        }
    }
    Ok(())
}
