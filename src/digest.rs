//! digest — deterministic content hash of a directory tree.
//!
//! Algorithm:
//! - enumerate every regular file under the root (any depth);
//! - hash each file's raw bytes with SHA-1;
//! - map POSIX-style relative path ("/a/b", forward slashes on every host)
//!   to that digest;
//! - walk the paths in ascending byte order, skip ignored ones, and feed
//!   `path bytes + b"\n" + raw 20-byte file digest` into one cumulative SHA-1.
//!
//! The result depends only on the surviving (path, content) pairs: enumeration
//! order, timestamps and permissions do not move it. Two trees with identical
//! bytes under identical relative paths hash identically.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use log::debug;
use sha1::{Digest, Sha1};
use walkdir::WalkDir;

use crate::error::{Result, VaultError};
use crate::ignore::IgnoreSet;
use crate::util::hex_encode;

/// Hex length of a full directory digest (SHA-1).
pub const HASH_HEX_LEN: usize = 40;

/// Compute the content digest of `root`, skipping paths matched by `ignores`.
///
/// Fails with `SourceMissing` when `root` does not exist.
pub fn hash_directory(root: &Path, ignores: &IgnoreSet) -> Result<String> {
    if !root.is_dir() {
        return Err(VaultError::SourceMissing(root.to_path_buf()));
    }

    // BTreeMap gives the ascending byte order the accumulation step needs.
    let mut files: BTreeMap<String, [u8; 20]> = BTreeMap::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk error"));
            VaultError::io(format!("walk {}", root.display()), source)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = relative_posix_path(root, entry.path());
        let digest = hash_file(entry.path())?;
        files.insert(rel, digest);
    }

    let mut cumulative = Sha1::new();
    let mut hashed = 0usize;
    for (rel, digest) in &files {
        if ignores.matches(rel) {
            continue;
        }
        cumulative.update(rel.as_bytes());
        cumulative.update(b"\n");
        cumulative.update(digest);
        hashed += 1;
    }
    debug!(
        "hash_directory {}: {} files hashed, {} enumerated",
        root.display(),
        hashed,
        files.len()
    );

    Ok(hex_encode(&cumulative.finalize()))
}

/// SHA-1 over one file's raw bytes, streamed.
fn hash_file(path: &Path) -> Result<[u8; 20]> {
    let mut f =
        File::open(path).map_err(|e| VaultError::io(format!("open {}", path.display()), e))?;
    let mut hasher = Sha1::new();
    std::io::copy(&mut f, &mut hasher)
        .map_err(|e| VaultError::io(format!("read {}", path.display()), e))?;
    Ok(hasher.finalize().into())
}

/// Relative path of `path` under `root`, rendered POSIX-style: rooted at `/`,
/// forward slashes regardless of host separator.
fn relative_posix_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for comp in rel.components() {
        out.push('/');
        out.push_str(&comp.as_os_str().to_string_lossy());
    }
    out
}
