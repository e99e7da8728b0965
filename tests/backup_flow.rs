// tests/backup_flow.rs
//
// End-to-end flows against a real storage root:
// - create + dedup idempotence (second request of unchanged content adds nothing),
// - restore round-trip (metadata file stays behind),
// - delete removes the backing directory entirely,
// - describe and rehash mutate the record in place.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use slotvault::{
    backup_dir, create_backup, delete_backup, hash_directory, list_all, list_for_session,
    rehash_backup, restore_backup, set_description, BackupKey, BackupOutcome, IgnoreSet,
    BACKUP_META_FILE,
};

const SESSION: &str = "20230518-231856";

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("slotvault-{}-{}-{}", prefix, pid, t))
}

fn make_source(prefix: &str) -> Result<PathBuf> {
    let src = unique_root(prefix);
    fs::create_dir_all(src.join("meta"))?;
    fs::write(src.join("slot.sav"), b"state-bytes")?;
    fs::write(src.join("meta/flags.dat"), [0u8, 1, 2, 3])?;
    Ok(src)
}

fn id_key(outcome: &BackupOutcome) -> BackupKey {
    BackupKey::Id(outcome.record().backup_id.clone())
}

#[test]
fn create_then_unchanged_keeps_exactly_one_backup() -> Result<()> {
    let store = unique_root("flow-dedup-store");
    let src = make_source("flow-dedup-src")?;

    let first = create_backup(&store, SESSION, &src, "initial", &[])?;
    let created = match &first {
        BackupOutcome::Created(r) => r.clone(),
        other => panic!("first request must create, got {other:?}"),
    };
    assert_eq!(created.session_id, SESSION);
    assert_eq!(created.contents_hash.len(), 40);

    // The backing directory digest (metadata excluded) equals the recorded hash.
    let dir = backup_dir(&store, &created);
    let ignores = IgnoreSet::compile(&[format!("/{BACKUP_META_FILE}")])?;
    assert_eq!(hash_directory(&dir, &ignores)?, created.contents_hash);

    // Unchanged source: no new record, the existing one is surfaced.
    let second = create_backup(&store, SESSION, &src, "ignored text", &[])?;
    match &second {
        BackupOutcome::Unchanged(r) => {
            assert_eq!(r.backup_id, created.backup_id);
            assert_eq!(r.description, "initial", "existing record is returned as-is");
        }
        other => panic!("second request must dedup, got {other:?}"),
    }
    assert_eq!(list_for_session(&store, SESSION)?.len(), 1, "store must not grow");

    // Changed source: a new backup appears.
    fs::write(src.join("slot.sav"), b"state-bytes-v2")?;
    let third = create_backup(&store, SESSION, &src, "after change", &[])?;
    assert!(matches!(third, BackupOutcome::Created(_)));
    assert_eq!(list_for_session(&store, SESSION)?.len(), 2);
    Ok(())
}

#[test]
fn same_second_backups_get_distinct_ids() -> Result<()> {
    let store = unique_root("flow-collide-store");
    let src = make_source("flow-collide-src")?;

    let first = match create_backup(&store, SESSION, &src, "first", &[])? {
        BackupOutcome::Created(r) => r,
        other => panic!("first request must create, got {other:?}"),
    };

    // Change content and immediately back up again — with second-resolution
    // ids this lands in the same wall-clock second more often than not.
    fs::write(src.join("slot.sav"), b"state-bytes-v2")?;
    let second = match create_backup(&store, SESSION, &src, "second", &[])? {
        BackupOutcome::Created(r) => r,
        other => panic!("changed content must create, got {other:?}"),
    };

    assert_ne!(
        second.backup_id, first.backup_id,
        "(session_id, backup_id) must stay unique"
    );
    assert_eq!(list_for_session(&store, SESSION)?.len(), 2);

    // The earlier backup is untouched: its content and recorded hash agree.
    let first_dir = backup_dir(&store, &first);
    assert_eq!(fs::read(first_dir.join("slot.sav"))?, b"state-bytes");
    let ignores = IgnoreSet::compile(&[format!("/{BACKUP_META_FILE}")])?;
    assert_eq!(hash_directory(&first_dir, &ignores)?, first.contents_hash);
    Ok(())
}

#[test]
fn extra_ignores_keep_volatile_files_out_of_the_digest() -> Result<()> {
    let store = unique_root("flow-ignore-store");
    let src = make_source("flow-ignore-src")?;
    let ignores = vec!["*.tmp".to_string()];

    let first = create_backup(&store, SESSION, &src, "", &ignores)?;
    assert!(matches!(first, BackupOutcome::Created(_)));

    // A scratch file matching the pattern does not defeat the dedup guard.
    fs::write(src.join("scratch.tmp"), b"volatile")?;
    let second = create_backup(&store, SESSION, &src, "", &ignores)?;
    assert!(matches!(second, BackupOutcome::Unchanged(_)));
    Ok(())
}

#[test]
fn restore_round_trips_content_without_metadata() -> Result<()> {
    let store = unique_root("flow-restore-store");
    let src = make_source("flow-restore-src")?;
    let outcome = create_backup(&store, SESSION, &src, "", &[])?;
    let key = id_key(&outcome);

    // Target currently holds diverged content that must be replaced.
    let target = unique_root("flow-restore-target");
    fs::create_dir_all(&target)?;
    fs::write(target.join("slot.sav"), b"diverged")?;
    fs::write(target.join("stray.dat"), b"leftover")?;

    restore_backup(&store, SESSION, &key, &target)?;

    assert_eq!(fs::read(target.join("slot.sav"))?, b"state-bytes");
    assert_eq!(fs::read(target.join("meta/flags.dat"))?, [0u8, 1, 2, 3]);
    assert!(!target.join("stray.dat").exists(), "target is replaced wholesale");
    assert!(
        !target.join(BACKUP_META_FILE).exists(),
        "metadata file must not travel with a restore"
    );

    // Restored tree hashes to the recorded digest.
    assert_eq!(
        hash_directory(&target, &IgnoreSet::empty())?,
        outcome.record().contents_hash
    );
    Ok(())
}

#[test]
fn delete_removes_the_backing_directory() -> Result<()> {
    let store = unique_root("flow-delete-store");
    let src = make_source("flow-delete-src")?;
    let outcome = create_backup(&store, SESSION, &src, "", &[])?;
    let dir = backup_dir(&store, outcome.record());
    assert!(dir.is_dir());

    delete_backup(&store, SESSION, &id_key(&outcome))?;
    assert!(!dir.exists(), "metadata and content go together, no soft-delete");
    assert!(list_all(&store)?.is_empty());

    // Deleting again: nothing left to resolve.
    assert!(delete_backup(&store, SESSION, &id_key(&outcome)).is_err());
    Ok(())
}

#[test]
fn describe_rewrites_description_in_place() -> Result<()> {
    let store = unique_root("flow-describe-store");
    let src = make_source("flow-describe-src")?;
    let outcome = create_backup(&store, SESSION, &src, "old", &[])?;

    let updated = set_description(&store, SESSION, &id_key(&outcome), "new text")?;
    assert_eq!(updated.description, "new text");

    let listed = list_for_session(&store, SESSION)?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "new text");
    assert_eq!(
        listed[0].contents_hash,
        outcome.record().contents_hash,
        "description edits must not touch the hash"
    );

    // A multi-line description cannot be represented in the line-based
    // metadata format; it is rejected and the stored record stays intact.
    assert!(set_description(&store, SESSION, &id_key(&outcome), "a\nb").is_err());
    assert_eq!(list_for_session(&store, SESSION)?[0].description, "new text");
    Ok(())
}

#[test]
fn rehash_tracks_out_of_band_edits() -> Result<()> {
    let store = unique_root("flow-rehash-store");
    let src = make_source("flow-rehash-src")?;
    let outcome = create_backup(&store, SESSION, &src, "", &[])?;
    let key = id_key(&outcome);
    let dir = backup_dir(&store, outcome.record());

    // Out-of-band edit invalidates the recorded hash until an explicit rehash.
    fs::write(dir.join("slot.sav"), b"edited-behind-our-back")?;

    let updated = rehash_backup(&store, SESSION, &key, &[])?;
    assert_ne!(updated.contents_hash, outcome.record().contents_hash);

    let ignores = IgnoreSet::compile(&[format!("/{BACKUP_META_FILE}")])?;
    assert_eq!(hash_directory(&dir, &ignores)?, updated.contents_hash);

    // Rehash of an untouched backup is a no-op.
    let again = rehash_backup(&store, SESSION, &key, &[])?;
    assert_eq!(again.contents_hash, updated.contents_hash);

    // A crash-leftover metadata tmp file is covered by the built-in ignore
    // pattern and does not shift the digest.
    fs::write(dir.join(format!("{BACKUP_META_FILE}.tmp")), b"partial")?;
    let with_tmp = rehash_backup(&store, SESSION, &key, &[])?;
    assert_eq!(with_tmp.contents_hash, updated.contents_hash);
    Ok(())
}
