// tests/digest_determinism.rs
//
// Properties of the directory digest:
// 1) Two trees with identical bytes under identical relative paths hash
//    identically (creation order and timestamps do not matter).
// 2) One-byte edits, adds, removes and renames move the digest.
// 3) Ignored paths do not contribute.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use slotvault::{hash_directory, IgnoreSet, VaultError};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("slotvault-{}-{}-{}", prefix, pid, t))
}

fn write_file(root: &Path, rel: &str, bytes: &[u8]) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

#[test]
fn copy_of_tree_hashes_identically() -> Result<()> {
    let a = unique_root("digest-a");
    let b = unique_root("digest-b");

    // Same content, deliberately created in different orders.
    write_file(&a, "slot.sav", b"state-bytes")?;
    write_file(&a, "meta/flags.dat", &[0u8, 1, 2, 3])?;
    write_file(&a, "meta/inventory.dat", b"sword,shield")?;

    write_file(&b, "meta/inventory.dat", b"sword,shield")?;
    write_file(&b, "meta/flags.dat", &[0u8, 1, 2, 3])?;
    write_file(&b, "slot.sav", b"state-bytes")?;

    let ignores = IgnoreSet::empty();
    let ha = hash_directory(&a, &ignores)?;
    let hb = hash_directory(&b, &ignores)?;
    assert_eq!(ha, hb, "byte-identical trees must hash identically");
    assert_eq!(ha.len(), 40, "sha1 hex must be 40 chars");
    assert!(
        ha.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
        "digest must be lowercase hex"
    );
    Ok(())
}

#[test]
fn timestamp_touch_does_not_move_digest() -> Result<()> {
    let root = unique_root("digest-touch");
    write_file(&root, "slot.sav", b"payload")?;

    let ignores = IgnoreSet::empty();
    let before = hash_directory(&root, &ignores)?;

    // Touch mtime only; no byte changes.
    let f = fs::OpenOptions::new()
        .write(true)
        .open(root.join("slot.sav"))?;
    f.set_modified(std::time::SystemTime::now() - std::time::Duration::from_secs(86400))?;
    drop(f);

    let after = hash_directory(&root, &ignores)?;
    assert_eq!(before, after, "mtime-only change must not move the digest");
    Ok(())
}

#[test]
fn single_byte_edit_moves_digest() -> Result<()> {
    let root = unique_root("digest-edit");
    write_file(&root, "slot.sav", b"AAAA")?;

    let ignores = IgnoreSet::empty();
    let before = hash_directory(&root, &ignores)?;

    write_file(&root, "slot.sav", b"AAAB")?;
    let after = hash_directory(&root, &ignores)?;
    assert_ne!(before, after, "one-byte edit must move the digest");
    Ok(())
}

#[test]
fn rename_moves_digest_even_with_same_bytes() -> Result<()> {
    let root = unique_root("digest-rename");
    write_file(&root, "slot.sav", b"payload")?;

    let ignores = IgnoreSet::empty();
    let before = hash_directory(&root, &ignores)?;

    fs::rename(root.join("slot.sav"), root.join("slot2.sav"))?;
    let after = hash_directory(&root, &ignores)?;
    assert_ne!(before, after, "path strings are part of the digest");
    Ok(())
}

#[test]
fn ignored_file_does_not_contribute() -> Result<()> {
    let root = unique_root("digest-ignore");
    write_file(&root, "slot.sav", b"payload")?;

    let ignores = IgnoreSet::compile(&["/backup.meta", "*.tmp"])?;
    let before = hash_directory(&root, &ignores)?;

    // Matching adds: no movement.
    write_file(&root, "backup.meta", b"[backup]\n")?;
    write_file(&root, "scratch.tmp", b"junk")?;
    assert_eq!(
        before,
        hash_directory(&root, &ignores)?,
        "ignored files must not contribute"
    );

    // Non-matching add: digest moves.
    write_file(&root, "extra.dat", b"new")?;
    assert_ne!(
        before,
        hash_directory(&root, &ignores)?,
        "a non-ignored file must move the digest"
    );
    Ok(())
}

#[test]
fn missing_root_is_source_missing() {
    let root = unique_root("digest-missing");
    let err = hash_directory(&root, &IgnoreSet::empty()).unwrap_err();
    match err {
        VaultError::SourceMissing(p) => assert_eq!(p, root),
        other => panic!("expected SourceMissing, got {other:?}"),
    }
}
