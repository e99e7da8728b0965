use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::key;

pub fn exec(store: Option<PathBuf>, json: bool) -> Result<()> {
    let root = key::storage_root(store)?;
    let sessions = slotvault::list_sessions(&root)
        .with_context(|| format!("list sessions at {}", root.display()))?;

    if json {
        println!("{}", serde_json::to_string(&sessions)?);
        return Ok(());
    }
    if sessions.is_empty() {
        println!("(no sessions)");
        return Ok(());
    }
    for s in sessions {
        println!("{s}");
    }
    Ok(())
}
