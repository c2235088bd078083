use dh_checksum::{ChecksumError, Sha256Hash};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identifier of a stored version: the SHA-256 of its content.
///
/// The identifier doubles as the blob's file name, so it is always canonical lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(Sha256Hash);

impl VersionId {
    /// Derives the identifier for `content`.
    pub fn of(content: &[u8]) -> Self {
        Self(Sha256Hash::of(content))
    }

    /// Validates an externally supplied identifier.
    pub fn parse(input: &str) -> Result<Self, ChecksumError> {
        Sha256Hash::parse(input).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn hash(&self) -> &Sha256Hash {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for VersionId {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionId::parse(s)
    }
}

impl AsRef<str> for VersionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
