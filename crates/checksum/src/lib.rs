//! Content checksums and their canonical hex form.
//!
//! Delta History names every stored blob by the SHA-256 digest of its bytes, and every file
//! folder by the SHA-256 digest of its file identifier. To keep path derivation deterministic,
//! digests are always handled in a *canonical* representation: **64 lowercase hexadecimal
//! characters**.
//!
//! This crate provides:
//! - A wrapper type ([`Sha256Hash`]) that *guarantees* the canonical format once constructed.
//! - Hashing helpers that produce the wrapper directly from bytes.
//!
//! ## Canonical form
//! - Length: 64
//! - Characters: `0-9` and `a-f` only
//! - Example: `b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9`
//!
//! Non-canonical values (uppercase, wrong length, non-hex) are rejected by
//! [`Sha256Hash::parse`]. A canonical digest is always safe to use as a single path segment.

mod hash;

pub use hash::{Sha256Hash, SHA256_HEX_LEN};

/// Error type for checksum operations.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// Input was not a canonical SHA-256 hex digest
    #[error("Invalid checksum: {0}")]
    InvalidInput(String),
}

/// Result type for checksum operations.
pub type ChecksumResult<T> = Result<T, ChecksumError>;
