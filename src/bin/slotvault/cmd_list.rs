use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use slotvault::SnapshotRecord;

use crate::key;

#[derive(Serialize)]
struct Row<'a> {
    session_id: &'a str,
    backup_id: &'a str,
    contents_hash: &'a str,
    contents_shorthash: &'a str,
    description: &'a str,
}

impl<'a> Row<'a> {
    fn from(r: &'a SnapshotRecord) -> Self {
        Self {
            session_id: &r.session_id,
            backup_id: &r.backup_id,
            contents_hash: &r.contents_hash,
            contents_shorthash: r.short_hash(),
            description: &r.description,
        }
    }
}

pub fn exec(store: Option<PathBuf>, session: Option<String>, json: bool) -> Result<()> {
    let root = key::storage_root(store)?;
    let records = match session.as_deref() {
        Some(s) => slotvault::list_for_session(&root, s),
        None => slotvault::list_all(&root),
    }
    .with_context(|| format!("list backups at {}", root.display()))?;

    if json {
        let rows: Vec<Row> = records.iter().map(Row::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("(no backups)");
        return Ok(());
    }

    // Grouped by session, ascending backup_id within each (list_* order).
    let mut current_session: Option<&str> = None;
    for r in &records {
        if current_session != Some(r.session_id.as_str()) {
            println!("session {}", r.session_id);
            current_session = Some(&r.session_id);
        }
        println!("  {}  {}  {}", r.backup_id, r.short_hash(), r.description);
    }
    Ok(())
}
