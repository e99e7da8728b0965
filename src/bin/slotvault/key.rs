use anyhow::{anyhow, Result};
use std::path::PathBuf;

use slotvault::BackupKey;

/// Build the backup key from the three mutually exclusive CLI flags.
pub fn pick(
    id: Option<String>,
    short_hash: Option<String>,
    long_hash: Option<String>,
) -> Result<BackupKey> {
    match (id, short_hash, long_hash) {
        (Some(v), None, None) => Ok(BackupKey::Id(v)),
        (None, Some(v), None) => {
            if v.len() != slotvault::SHORT_HASH_LEN {
                return Err(anyhow!(
                    "--short-hash must be {} characters",
                    slotvault::SHORT_HASH_LEN
                ));
            }
            Ok(BackupKey::ShortHash(v))
        }
        (None, None, Some(v)) => {
            if v.len() != slotvault::HASH_HEX_LEN {
                return Err(anyhow!(
                    "--long-hash must be {} characters",
                    slotvault::HASH_HEX_LEN
                ));
            }
            Ok(BackupKey::LongHash(v))
        }
        _ => Err(anyhow!(
            "provide exactly one of --id / --short-hash / --long-hash"
        )),
    }
}

/// Storage root: --store flag, else SLOTVAULT_STORE.
pub fn storage_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = flag {
        return Ok(p);
    }
    slotvault::config::VaultConfig::from_env()
        .storage_root
        .ok_or_else(|| anyhow!("no storage root: pass --store or set SLOTVAULT_STORE"))
}

/// Extra ignore patterns: CLI flags plus SLOTVAULT_IGNORE.
pub fn extra_ignores(flags: Vec<String>) -> Vec<String> {
    let mut out = slotvault::config::VaultConfig::from_env().ignore_patterns;
    out.extend(flags);
    out
}
