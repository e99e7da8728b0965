use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// slotvault — content-addressed backups of save-slot directories
#[derive(Parser, Debug)]
#[command(name = "slotvault", version, about = "slotvault CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Back up a save-slot directory (skipped if its content is already stored)
    Backup {
        /// Storage root (falls back to SLOTVAULT_STORE)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Session id (YYYYMMDD-HHMMSS, extracted from the game state)
        #[arg(long)]
        session: String,
        /// Save-slot directory to back up
        #[arg(long)]
        source: PathBuf,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Extra ignore pattern (repeatable; `*` wildcards allowed)
        #[arg(long)]
        ignore: Vec<String>,
    },
    /// List backups, grouped by session (use --json for JSON)
    List {
        #[arg(long)]
        store: Option<PathBuf>,
        /// Only this session
        #[arg(long)]
        session: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List distinct session ids
    Sessions {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Restore a backup over a target directory
    ///
    /// Exactly one of --id / --short-hash / --long-hash selects the backup.
    Restore {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        session: String,
        /// Backup id (YYYYMMDD-HHMMSS)
        #[arg(long)]
        id: Option<String>,
        /// 7-char hash prefix
        #[arg(long)]
        short_hash: Option<String>,
        /// Full 40-char hash
        #[arg(long)]
        long_hash: Option<String>,
        /// Directory to restore into (replaced wholesale)
        #[arg(long)]
        target: PathBuf,
    },
    /// Delete a backup (directory removed entirely)
    Delete {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        session: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        short_hash: Option<String>,
        #[arg(long)]
        long_hash: Option<String>,
    },
    /// Replace a backup's description
    Describe {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        session: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        short_hash: Option<String>,
        #[arg(long)]
        long_hash: Option<String>,
        /// New description text
        #[arg(long)]
        text: String,
    },
    /// Recompute a backup's contents hash after out-of-band edits
    Rehash {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        session: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        short_hash: Option<String>,
        #[arg(long)]
        long_hash: Option<String>,
        /// Extra ignore pattern (repeatable)
        #[arg(long)]
        ignore: Vec<String>,
    },
}
