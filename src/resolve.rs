//! resolve — locate one backup by a human-supplied key.
//!
//! Three key kinds, mutually exclusive by contract:
//! - Id: exact `backup_id` equality;
//! - ShortHash: equality against the derived 7-char hash prefix;
//! - LongHash: exact `contents_hash` equality.
//!
//! Matching scans the session's records in ascending `backup_id` order.
//! More than one match is a hard Ambiguous error: same-second ids and
//! short-hash prefix collisions are structurally possible, and restore/delete
//! must never act on a silently-picked record.

use crate::error::{Result, VaultError};
use crate::record::SnapshotRecord;

/// One of the three alternative backup keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupKey {
    Id(String),
    ShortHash(String),
    LongHash(String),
}

impl BackupKey {
    pub fn kind(&self) -> &'static str {
        match self {
            BackupKey::Id(_) => "backup id",
            BackupKey::ShortHash(_) => "short hash",
            BackupKey::LongHash(_) => "full hash",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            BackupKey::Id(v) | BackupKey::ShortHash(v) | BackupKey::LongHash(v) => v,
        }
    }

    fn matches(&self, record: &SnapshotRecord) -> bool {
        match self {
            BackupKey::Id(v) => record.backup_id == *v,
            BackupKey::ShortHash(v) => record.short_hash() == v,
            BackupKey::LongHash(v) => record.contents_hash == *v,
        }
    }
}

/// Find the single record of `session_id` matching `key`.
///
/// `records` may span several sessions (e.g. a full `list_all` result); only
/// the target session is considered. Input order does not matter, matches are
/// taken in ascending `backup_id` order.
pub fn resolve<'a>(
    records: &'a [SnapshotRecord],
    session_id: &str,
    key: &BackupKey,
) -> Result<&'a SnapshotRecord> {
    let mut matches: Vec<&SnapshotRecord> = records
        .iter()
        .filter(|r| r.session_id == session_id && key.matches(r))
        .collect();
    matches.sort_by(|a, b| a.backup_id.cmp(&b.backup_id));

    match matches.len() {
        0 => Err(VaultError::NoMatch {
            session: session_id.to_string(),
            kind: key.kind(),
            value: key.value().to_string(),
        }),
        1 => Ok(matches[0]),
        n => Err(VaultError::Ambiguous {
            session: session_id.to_string(),
            kind: key.kind(),
            value: key.value().to_string(),
            count: n,
        }),
    }
}
