//! Delta codec seam.
//!
//! The store decides *which* two buffers a delta is computed between; a [`DeltaCodec`] decides
//! how the delta is encoded. [`GDeltaCodec`] is the default and wraps the `gdelta` algorithm in
//! a small envelope that records the length and SHA-256 of the dictionary used to encode it:
//!
//! ```text
//! +------+-----------------+----------------------+----------------+
//! | DHD1 | source len (LE) | sha256(source)       | gdelta payload |
//! | 4 B  | 8 B             | 32 B                 | ...            |
//! +------+-----------------+----------------------+----------------+
//! ```
//!
//! Decoding checks the dictionary against the envelope before touching the payload, so a delta
//! applied to the wrong source fails loudly instead of producing garbage.

use dh_checksum::Sha256Hash;

const MAGIC: [u8; 4] = *b"DHD1";
const HEADER_LEN: usize = MAGIC.len() + 8 + 32;

/// Errors produced while encoding or decoding a delta.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("delta is truncated: need at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("delta does not start with the expected header")]
    BadMagic,

    /// The dictionary passed to decode is not the source the delta was encoded against
    #[error(
        "dictionary does not match delta source: expected {expected_len} bytes ({expected_hash}), got {actual_len} bytes ({actual_hash})"
    )]
    DictionaryMismatch {
        expected_len: u64,
        expected_hash: Sha256Hash,
        actual_len: u64,
        actual_hash: Sha256Hash,
    },

    #[error("delta backend failed: {0}")]
    Backend(String),
}

/// Encodes and decodes deltas between two byte buffers.
pub trait DeltaCodec {
    /// Produces a delta that rebuilds `target` when decoded against `dictionary`.
    fn encode(&self, target: &[u8], dictionary: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Rebuilds the target from `delta` and the same `dictionary` used to encode it.
    fn decode(&self, delta: &[u8], dictionary: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// `gdelta`-backed codec with a dictionary-verifying envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct GDeltaCodec;

impl DeltaCodec for GDeltaCodec {
    fn encode(&self, target: &[u8], dictionary: &[u8]) -> Result<Vec<u8>, CodecError> {
        let payload =
            gdelta::encode(target, dictionary).map_err(|e| CodecError::Backend(e.to_string()))?;

        let mut delta = Vec::with_capacity(HEADER_LEN + payload.len());
        delta.extend_from_slice(&MAGIC);
        delta.extend_from_slice(&(dictionary.len() as u64).to_le_bytes());
        delta.extend_from_slice(&Sha256Hash::of(dictionary).to_bytes());
        delta.extend_from_slice(&payload);
        Ok(delta)
    }

    fn decode(&self, delta: &[u8], dictionary: &[u8]) -> Result<Vec<u8>, CodecError> {
        if delta.len() < HEADER_LEN {
            return Err(CodecError::Truncated {
                expected: HEADER_LEN,
                actual: delta.len(),
            });
        }

        let (magic, rest) = delta.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(CodecError::BadMagic);
        }

        let (len_bytes, rest) = rest.split_at(8);
        let (hash_bytes, payload) = rest.split_at(32);

        let mut len_buf = [0u8; 8];
        len_buf.copy_from_slice(len_bytes);
        let expected_len = u64::from_le_bytes(len_buf);

        let mut hash_buf = [0u8; 32];
        hash_buf.copy_from_slice(hash_bytes);
        let expected_hash = Sha256Hash::from_bytes(&hash_buf);

        let actual_len = dictionary.len() as u64;
        let actual_hash = Sha256Hash::of(dictionary);
        if expected_len != actual_len || expected_hash != actual_hash {
            return Err(CodecError::DictionaryMismatch {
                expected_len,
                expected_hash,
                actual_len,
                actual_hash,
            });
        }

        gdelta::decode(payload, dictionary).map_err(|e| CodecError::Backend(e.to_string()))
    }
}
