//! SHA-256 digest wrapper.

use crate::{ChecksumError, ChecksumResult};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

/// Length of a canonical SHA-256 hex digest.
pub const SHA256_HEX_LEN: usize = 64;

/// A SHA-256 digest in canonical form (64 lowercase hex characters).
///
/// Once constructed, the contained string is guaranteed to be canonical, so it can be used
/// directly as a file or directory name without further escaping.
///
/// # Construction
/// - [`Sha256Hash::of`] hashes a byte buffer.
/// - [`Sha256Hash::from_bytes`] wraps an already computed 32-byte digest.
/// - [`Sha256Hash::parse`] validates an externally supplied hex string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Hashes `data` and returns its canonical digest.
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        let digest: [u8; 32] = Sha256::digest(data.as_ref()).into();
        Self::from_bytes(&digest)
    }

    /// Wraps a raw 32-byte digest.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Validates and parses a digest string that must already be canonical.
    ///
    /// Uppercase hex is **not** normalised; callers must pass the canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> ChecksumResult<Self> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(ChecksumError::InvalidInput(format!(
            "SHA-256 digest must be {} lowercase hex characters, got: '{}'",
            SHA256_HEX_LEN, input
        )))
    }

    /// Returns true if `input` is a canonical SHA-256 hex digest.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == SHA256_HEX_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Decodes the digest back into its 32 raw bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        // SAFETY: canonical form guarantees 64 valid hex characters
        hex::decode_to_slice(&self.0, &mut out).expect("canonical digest is valid hex");
        out
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sha256Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sha256Hash {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sha256Hash::parse(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Sha256Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Sha256Hash::parse(&s).map_err(serde::de::Error::custom)
    }
}
