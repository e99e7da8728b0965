//! util — shared helpers.
//!
//! Contains:
//! - now_stamp(): wall-clock timestamp id (`YYYYMMDD-HHMMSS`, second resolution).
//! - hex_encode(): lowercase hex of raw bytes.
//! - copy_dir_tree(): byte-for-byte recursive copy, optionally skipping one
//!   top-level filename (used to leave the metadata file behind on restore).

use std::fs;
use std::path::Path;

use chrono::Local;
use walkdir::WalkDir;

use crate::error::{Result, VaultError};

/// Current local time as a `YYYYMMDD-HHMMSS` id. Unique only by convention:
/// two calls within one second return the same id.
pub fn now_stamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Lowercase hex encoding.
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

/// Copy `src` recursively into `dst`, creating `dst` if needed.
///
/// `skip_top`: a single top-level file name to leave out (deeper files with
/// the same name are copied).
pub fn copy_dir_tree(src: &Path, dst: &Path, skip_top: Option<&str>) -> Result<()> {
    if !src.is_dir() {
        return Err(VaultError::SourceMissing(src.to_path_buf()));
    }
    fs::create_dir_all(dst).map_err(|e| VaultError::io(format!("create {}", dst.display()), e))?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk error"));
            VaultError::io(format!("walk {}", src.display()), source)
        })?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under src");
        if entry.depth() == 1 {
            if let Some(skip) = skip_top {
                if entry.file_type().is_file() && rel.as_os_str() == skip {
                    continue;
                }
            }
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| VaultError::io(format!("create {}", target.display()), e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| VaultError::io(format!("create {}", parent.display()), e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| {
                VaultError::io(
                    format!("copy {} -> {}", entry.path().display(), target.display()),
                    e,
                )
            })?;
        }
        // Symlinks and other special files are not part of a save slot; skipped.
    }
    Ok(())
}
