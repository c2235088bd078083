//! Store configuration.
//!
//! Configuration is resolved once, before a store is constructed, and then handed to the store.
//! The store never reads environment variables itself.

use crate::constants::DEFAULT_MAX_DISC_STORAGE_SIZE;
use crate::{StoreError, StoreResult};

/// Configuration accepted at store construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    max_disc_storage_size: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_disc_storage_size: DEFAULT_MAX_DISC_STORAGE_SIZE,
        }
    }
}

impl StoreConfig {
    /// Create a new `StoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidConfig` if `max_disc_storage_size` is zero.
    pub fn new(max_disc_storage_size: u64) -> StoreResult<Self> {
        if max_disc_storage_size == 0 {
            return Err(StoreError::InvalidConfig(
                "max_disc_storage_size must be greater than zero".into(),
            ));
        }

        Ok(Self {
            max_disc_storage_size,
        })
    }

    /// Capacity ceiling in bytes.
    ///
    /// This value is recorded only. Nothing in the store checks writes against it.
    pub fn max_disc_storage_size(&self) -> u64 {
        self.max_disc_storage_size
    }

    /// Build a config from an optional raw value, typically an environment variable.
    ///
    /// If `value` is `None` or empty/whitespace, the default ceiling is used.
    pub fn from_env_value(value: Option<String>) -> StoreResult<Self> {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value {
            None => Ok(Self::default()),
            Some(raw) => {
                let parsed = raw.parse::<u64>().map_err(|e| {
                    StoreError::InvalidConfig(format!(
                        "max_disc_storage_size must be a positive integer, got '{}': {}",
                        raw, e
                    ))
                })?;
                Self::new(parsed)
            }
        }
    }
}
