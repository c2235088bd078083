/// File name of the serialized index inside the storage root.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Directory under the storage root holding one folder per file.
pub const DATA_DIR_NAME: &str = "data";

/// Prefix for temporary storage roots.
pub const TEMP_DIR_PREFIX: &str = "deltaHistory_";

/// Default capacity ceiling in bytes. Recorded but not enforced.
pub const DEFAULT_MAX_DISC_STORAGE_SIZE: u64 = 1_280_000_000;

/// Environment variable read by [`crate::StoreConfig::from_env_value`] callers.
pub const MAX_DISC_STORAGE_SIZE_ENV: &str = "DELTA_HISTORY_MAX_DISC_STORAGE_SIZE";

pub(crate) const TEMP_SUFFIX: &str = ".tmp";
