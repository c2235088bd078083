//! Durable file index.
//!
//! The [`Index`] maps every known file identifier to a [`FileRecord`]: the folder its blobs
//! live in, the set of versions recorded for it, and which of those is the latest. The index
//! owns no version bytes.
//!
//! Every mutation is followed by a synchronous flush of the *whole* index to disk. The flush
//! writes a temporary sibling and renames it over `index.json`, so the file on disk is always a
//! complete document. If the flush fails, the in-memory state is rolled back to what it was
//! before the mutation, keeping memory and disk in agreement.

use crate::constants::TEMP_SUFFIX;
use crate::{io_error, StoreError, StoreResult, VersionId};
use dh_checksum::Sha256Hash;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Metadata for one tracked file.
///
/// Invariant: `latest` is always a member of `versions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    folder: Sha256Hash,
    latest: VersionId,
    #[serde(with = "version_set")]
    versions: BTreeSet<VersionId>,
}

impl FileRecord {
    fn new(file_id: &str, first_version: VersionId) -> Self {
        Self {
            folder: Index::folder_for(file_id),
            latest: first_version.clone(),
            versions: BTreeSet::from([first_version]),
        }
    }

    /// Folder name under `data/`.
    pub fn folder(&self) -> &Sha256Hash {
        &self.folder
    }

    pub fn latest(&self) -> &VersionId {
        &self.latest
    }

    pub fn versions(&self) -> &BTreeSet<VersionId> {
        &self.versions
    }

    pub fn contains(&self, version_id: &VersionId) -> bool {
        self.versions.contains(version_id)
    }
}

/// On-disk shape of the index: `{ "files": { ... } }`.
#[derive(Deserialize)]
struct IndexDocument {
    #[serde(default)]
    files: BTreeMap<String, FileRecord>,
}

#[derive(Serialize)]
struct IndexDocumentRef<'a> {
    files: &'a BTreeMap<String, FileRecord>,
}

/// In-memory index mirrored to a JSON file.
#[derive(Debug)]
pub struct Index {
    path: PathBuf,
    files: BTreeMap<String, FileRecord>,
}

impl Index {
    /// Loads the index at `path`, or initialises an empty one if the file does not exist.
    ///
    /// A missing index file is the only recoverable case and is treated as first use: an
    /// empty index is written immediately.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The file exists but cannot be read (I/O)
    /// - The file is not a valid index document
    /// - A record's `latest` is not among its `versions`
    /// - Writing the fresh index fails
    pub fn load_or_init(path: &Path) -> StoreResult<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let document: IndexDocument =
                    serde_json::from_slice(&bytes).map_err(StoreError::IndexDeserialization)?;

                for (file_id, record) in &document.files {
                    if !record.contains(&record.latest) {
                        return Err(StoreError::CorruptIndex(format!(
                            "latest version {} of file '{}' is not in its version set",
                            record.latest, file_id
                        )));
                    }
                }

                tracing::debug!(
                    path = %path.display(),
                    files = document.files.len(),
                    "loaded index"
                );

                Ok(Self {
                    path: path.to_path_buf(),
                    files: document.files,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let index = Self {
                    path: path.to_path_buf(),
                    files: BTreeMap::new(),
                };
                index.persist()?;
                tracing::debug!(path = %path.display(), "initialised empty index");
                Ok(index)
            }
            Err(e) => Err(io_error("read index", path, e)),
        }
    }

    /// Folder name for a file identifier.
    ///
    /// Raw identifiers may contain `/`, `..` or other characters that are unsafe in a path, so
    /// the folder is the SHA-256 of the identifier instead.
    pub fn folder_for(file_id: &str) -> Sha256Hash {
        Sha256Hash::of(file_id.as_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_file(&self, file_id: &str) -> bool {
        self.files.contains_key(file_id)
    }

    /// Returns whether `version_id` was recorded for `file_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileDoesNotExist` if the file is unknown.
    pub fn has_version(&self, file_id: &str, version_id: &VersionId) -> StoreResult<bool> {
        Ok(self.require(file_id)?.contains(version_id))
    }

    pub fn record(&self, file_id: &str) -> Option<&FileRecord> {
        self.files.get(file_id)
    }

    /// Like [`Index::record`], but unknown files are an error.
    pub fn require(&self, file_id: &str) -> StoreResult<&FileRecord> {
        self.files
            .get(file_id)
            .ok_or_else(|| StoreError::FileDoesNotExist {
                file_id: file_id.to_owned(),
            })
    }

    /// Known file identifiers, sorted.
    pub fn file_ids(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Records `version_id` for `file_id` and makes it the latest, then persists.
    ///
    /// Creates the file's record (and folder name) on first use. If persisting fails, the
    /// in-memory index is restored before the error is returned.
    pub fn record_version(&mut self, file_id: &str, version_id: &VersionId) -> StoreResult<()> {
        let previous = self.files.get(file_id).cloned();

        match self.files.get_mut(file_id) {
            Some(record) => {
                record.versions.insert(version_id.clone());
                record.latest = version_id.clone();
            }
            None => {
                self.files
                    .insert(file_id.to_owned(), FileRecord::new(file_id, version_id.clone()));
            }
        }

        if let Err(err) = self.persist() {
            match previous {
                Some(record) => {
                    self.files.insert(file_id.to_owned(), record);
                }
                None => {
                    self.files.remove(file_id);
                }
            }
            return Err(err);
        }

        Ok(())
    }

    /// Drops every record and persists the empty index.
    pub fn reset(&mut self) -> StoreResult<()> {
        let previous = std::mem::take(&mut self.files);

        if let Err(err) = self.persist() {
            self.files = previous;
            return Err(err);
        }

        Ok(())
    }

    /// Writes the complete index to disk.
    fn persist(&self) -> StoreResult<()> {
        let document = IndexDocumentRef { files: &self.files };
        let json =
            serde_json::to_vec_pretty(&document).map_err(StoreError::IndexSerialization)?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, &json).map_err(|e| io_error("write index", &temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error("replace index at", &self.path, e));
        }

        Ok(())
    }
}

/// Serialises a version set as `{ "<version_id>": true, ... }`.
mod version_set {
    use crate::VersionId;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub(super) fn serialize<S>(set: &BTreeSet<VersionId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(set.iter().map(|version_id| (version_id, true)))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<VersionId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<VersionId, bool>::deserialize(deserializer)?;
        Ok(map
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(version_id, _)| version_id)
            .collect())
    }
}
