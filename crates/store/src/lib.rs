//! Delta History version store
//!
//! This crate keeps every distinct version of a caller-identified byte buffer and serves binary
//! deltas from any stored version to the current latest one.
//!
//! ## Design Principles
//!
//! - Versions are content-addressed: a version's identifier is the SHA-256 of its bytes
//! - Versions are immutable once written and are never pruned
//! - Versions are scoped per file; there is no cross-file deduplication
//! - Raw file identifiers never become path segments
//! - The index is rewritten in full after every mutation
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── index.json                 # { "files": { <fileId>: { folder, latest, versions } } }
//! └── data/
//!     └── <sha256(fileId)>/
//!         └── <sha256(content)>  # raw bytes, one file per version
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use dh_store::{StoreConfig, VersionStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = VersionStore::temporary(StoreConfig::default())?;
//!
//! let v1 = store.add_version("doc", b"some text")?;
//! store.add_version("doc", b"some different text")?;
//!
//! let delta = store.get_delta("doc", &v1)?;
//! let rebuilt = store.apply_delta(&delta, b"some text")?;
//! assert_eq!(rebuilt, b"some different text");
//! # Ok(())
//! # }
//! ```

mod blob;
mod codec;
mod config;
mod constants;
mod index;
mod store;
mod version_id;

pub use codec::{CodecError, DeltaCodec, GDeltaCodec};
pub use config::StoreConfig;
pub use constants::{
    DATA_DIR_NAME, DEFAULT_MAX_DISC_STORAGE_SIZE, INDEX_FILE_NAME, MAX_DISC_STORAGE_SIZE_ENV,
    TEMP_DIR_PREFIX,
};
pub use dh_checksum::{ChecksumError, Sha256Hash};
pub use index::{FileRecord, Index};
pub use store::VersionStore;
pub use version_id::VersionId;

use std::path::Path;

/// Errors that can occur during version store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file identifier was never added, or the store has been reset since
    #[error("File does not exist: {file_id}")]
    FileDoesNotExist { file_id: String },

    /// The file is known but the version was never recorded for it
    #[error("Version {version_id} does not exist for file {file_id}")]
    VersionDoesNotExist {
        file_id: String,
        version_id: VersionId,
    },

    /// Storage root exists but cannot be used
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// Configuration value was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Externally supplied version identifier is not a canonical digest
    #[error("Invalid version id: {0}")]
    InvalidVersionId(#[from] ChecksumError),

    /// Index file parsed but violates its invariants
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    #[error("failed to serialize index: {0}")]
    IndexSerialization(serde_json::Error),

    #[error("failed to deserialize index: {0}")]
    IndexDeserialization(serde_json::Error),

    /// Delta encode or decode failed
    #[error("Delta codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns true for the two "not found" kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::FileDoesNotExist { .. } | StoreError::VersionDoesNotExist { .. }
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Wraps an I/O error with the action and path that produced it, keeping its kind.
pub(crate) fn io_error(action: &str, path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to {} {}: {}", action, path.display(), e),
    ))
}
