// Core modules
pub mod digest; // directory content hashing
pub mod error;
pub mod ignore; // compiled ignore patterns for the digest engine
pub mod record; // SnapshotRecord + backup.meta (de)serialization
pub mod resolve; // key resolution (id / short hash / full hash)
pub mod store; // enumeration under a storage root

// Flows and ambient pieces
pub mod backup; // create/restore/delete/describe/rehash
pub mod config;
pub mod lock;
pub mod util;

// Convenient re-exports
pub use backup::{
    create_backup, delete_backup, rehash_backup, restore_backup, set_description, BackupOutcome,
};
pub use digest::{hash_directory, HASH_HEX_LEN};
pub use error::{Result, VaultError};
pub use ignore::{IgnoreSet, Pattern};
pub use record::{
    is_backup_dir, read_record, write_record, SnapshotRecord, BACKUP_META_FILE, SHORT_HASH_LEN,
};
pub use resolve::{resolve, BackupKey};
pub use store::{backup_dir, find_by_hash, list_all, list_for_session, list_sessions};
