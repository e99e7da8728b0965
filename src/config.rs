//! Centralized configuration for slotvault.
//!
//! Goals:
//! - Single place for env tunables instead of scattering lookups.
//! - CLI flags always win; env fills the gaps.
//!
//! Env vars:
//! - SLOTVAULT_STORE:  storage root used when --store is omitted.
//! - SLOTVAULT_IGNORE: comma-separated extra ignore patterns applied to every
//!   digest computation (on top of the built-in metadata-file pattern).

use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct VaultConfig {
    /// Fallback storage root (SLOTVAULT_STORE).
    pub storage_root: Option<PathBuf>,
    /// Extra ignore patterns (SLOTVAULT_IGNORE, comma-separated).
    pub ignore_patterns: Vec<String>,
}

impl VaultConfig {
    pub fn from_env() -> Self {
        let storage_root = std::env::var("SLOTVAULT_STORE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let ignore_patterns = std::env::var("SLOTVAULT_IGNORE")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            storage_root,
            ignore_patterns,
        }
    }
}
