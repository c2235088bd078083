//! Version store implementation
//!
//! [`VersionStore`] ties the [`Index`] to the blob layout under `data/` and serves the public
//! operations: adding versions, reading the latest one, and producing deltas from any stored
//! version to the latest.
//!
//! # Ordering
//!
//! Every operation validates file and version existence against the index *before* touching
//! the disk, so a "not found" error never has side effects.
//!
//! `add_version` writes in a fixed order: folder, blob, index. If the index flush fails, the
//! blob (and folder) created by that call are removed again, so there is never a blob on disk
//! that the index does not know about, nor an index entry without its blob.
//!
//! # Lifetime
//!
//! A store built with [`VersionStore::temporary`] owns a fresh temporary directory; the whole
//! tree, index included, is removed when the store is closed or dropped. A store built with
//! [`VersionStore::open`] uses a caller-owned directory and leaves it in place.
//!
//! # Concurrency
//!
//! Mutating operations take `&mut self`. Pointing two stores (in one process or several) at the
//! same root is not supported; the result of concurrent writers on one root is undefined.

use crate::blob::BlobStore;
use crate::codec::{DeltaCodec, GDeltaCodec};
use crate::config::StoreConfig;
use crate::constants::{DATA_DIR_NAME, INDEX_FILE_NAME, TEMP_DIR_PREFIX};
use crate::index::{FileRecord, Index};
use crate::{io_error, StoreError, StoreResult, VersionId};
use dh_checksum::Sha256Hash;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where a store keeps its files, and who is responsible for removing them.
#[derive(Debug)]
enum StorageRoot {
    /// Removed when dropped
    Temporary(TempDir),
    /// Caller-owned
    Persistent(PathBuf),
}

impl StorageRoot {
    fn path(&self) -> &Path {
        match self {
            StorageRoot::Temporary(dir) => dir.path(),
            StorageRoot::Persistent(path) => path,
        }
    }
}

/// Content-addressed version store
///
/// # Design
///
/// - File-scoped: versions are grouped per caller-supplied file id
/// - Immutable: blobs are never modified after creation
/// - Content-addressed: versions are identified by their SHA-256 hash
/// - Path-safe: file ids are hashed before they reach the filesystem
#[derive(Debug)]
pub struct VersionStore<C: DeltaCodec = GDeltaCodec> {
    root: StorageRoot,
    config: StoreConfig,
    index: Index,
    blobs: BlobStore,
    codec: C,
}

impl VersionStore<GDeltaCodec> {
    /// Creates a store in a fresh temporary directory using the default codec.
    pub fn temporary(config: StoreConfig) -> StoreResult<Self> {
        Self::temporary_with_codec(config, GDeltaCodec)
    }

    /// Opens (or initialises) a store rooted at `root` using the default codec.
    ///
    /// Only one store may use a given root at a time.
    pub fn open(root: &Path, config: StoreConfig) -> StoreResult<Self> {
        Self::open_with_codec(root, config, GDeltaCodec)
    }
}

impl<C: DeltaCodec> VersionStore<C> {
    /// Creates a store in a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory, index or data folder cannot be created.
    pub fn temporary_with_codec(config: StoreConfig, codec: C) -> StoreResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|e| io_error("create temporary directory in", &std::env::temp_dir(), e))?;

        Self::init(StorageRoot::Temporary(dir), config, codec)
    }

    /// Opens (or initialises) a store rooted at `root`.
    ///
    /// The directory is created if missing. An existing `index.json` is loaded; a missing one
    /// means first use and an empty index is written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - `root` exists but is not a directory
    /// - The directory cannot be created or canonicalised (I/O)
    /// - An existing index cannot be read or parsed
    pub fn open_with_codec(root: &Path, config: StoreConfig, codec: C) -> StoreResult<Self> {
        if root.exists() && !root.is_dir() {
            return Err(StoreError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root.display()
            )));
        }

        fs::create_dir_all(root).map_err(|e| io_error("create storage root", root, e))?;

        let root = root.canonicalize().map_err(|e| {
            StoreError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root.display(),
                e
            ))
        })?;

        Self::init(StorageRoot::Persistent(root), config, codec)
    }

    fn init(root: StorageRoot, config: StoreConfig, codec: C) -> StoreResult<Self> {
        let index = Index::load_or_init(&root.path().join(INDEX_FILE_NAME))?;
        let blobs = BlobStore::new(root.path().join(DATA_DIR_NAME));
        blobs.ensure_data_dir()?;

        tracing::info!(
            root = %root.path().display(),
            files = index.len(),
            max_disc_storage_size = config.max_disc_storage_size(),
            "opened version store"
        );

        Ok(Self {
            root,
            config,
            index,
            blobs,
            codec,
        })
    }

    /// Stores `content` as a version of `file_id` and makes it the latest.
    ///
    /// Adding the same bytes again returns the same id and writes nothing new.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The file folder cannot be created (I/O)
    /// - The blob cannot be written (I/O)
    /// - The index cannot be persisted; the blob and folder created by this call are removed
    pub fn add_version(&mut self, file_id: &str, content: &[u8]) -> StoreResult<VersionId> {
        let version_id = VersionId::of(content);

        let (folder, created_folder) = match self.index.record(file_id) {
            Some(record) => (record.folder().clone(), false),
            None => {
                let folder = Index::folder_for(file_id);
                let created = self.blobs.create_folder(&folder)?;
                (folder, created)
            }
        };

        let known = self
            .index
            .record(file_id)
            .is_some_and(|record| record.contains(&version_id));

        let wrote_blob = if known {
            false
        } else {
            match self.blobs.write_once(&folder, &version_id, content) {
                Ok(wrote) => wrote,
                Err(err) => {
                    self.discard_partial_add(file_id, &folder, None, created_folder);
                    return Err(err);
                }
            }
        };

        if let Err(err) = self.index.record_version(file_id, &version_id) {
            let written = wrote_blob.then_some(&version_id);
            self.discard_partial_add(file_id, &folder, written, created_folder);
            return Err(err);
        }

        tracing::debug!(
            file_id,
            version_id = %version_id,
            size_bytes = content.len(),
            new_blob = wrote_blob,
            "added version"
        );

        Ok(version_id)
    }

    /// Best-effort removal of what a failed `add_version` left behind.
    fn discard_partial_add(
        &self,
        file_id: &str,
        folder: &Sha256Hash,
        written: Option<&VersionId>,
        created_folder: bool,
    ) {
        let cleanup = if created_folder {
            self.blobs.remove_folder(folder)
        } else if let Some(version_id) = written {
            self.blobs.remove(folder, version_id)
        } else {
            Ok(())
        };

        if let Err(e) = cleanup {
            tracing::warn!(file_id, error = %e, "failed to clean up after aborted add_version");
        }
    }

    /// Returns the bytes of the latest version of `file_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileDoesNotExist` if the file is unknown, or `StoreError::Io` if
    /// the blob cannot be read.
    pub fn get_latest_version(&self, file_id: &str) -> StoreResult<Vec<u8>> {
        let record = self.index.require(file_id)?;
        self.blobs.read(record.folder(), record.latest())
    }

    /// Returns the bytes of a specific stored version.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileDoesNotExist` or `StoreError::VersionDoesNotExist` before
    /// any disk access, or `StoreError::Io` if the blob cannot be read.
    pub fn get_version(&self, file_id: &str, version_id: &VersionId) -> StoreResult<Vec<u8>> {
        let record = self.require_version(file_id, version_id)?;
        self.blobs.read(record.folder(), version_id)
    }

    pub fn has_file(&self, file_id: &str) -> bool {
        self.index.has_file(file_id)
    }

    /// Returns whether `version_id` was stored for `file_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileDoesNotExist` if the file is unknown.
    pub fn has_version(&self, file_id: &str, version_id: &VersionId) -> StoreResult<bool> {
        self.index.has_version(file_id, version_id)
    }

    /// Computes a delta that turns `version_id` into the current latest version of `file_id`.
    ///
    /// The named version is the codec's dictionary and the latest version is the target; the
    /// direction is never reversed. Decoding the result with the named version's bytes
    /// reproduces the latest bytes exactly.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - The file is unknown (`FileDoesNotExist`)
    /// - The version was never stored for the file (`VersionDoesNotExist`)
    /// - Either blob cannot be read (I/O)
    /// - The codec fails
    pub fn get_delta(&self, file_id: &str, version_id: &VersionId) -> StoreResult<Vec<u8>> {
        let record = self.require_version(file_id, version_id)?;

        let source = self.blobs.read(record.folder(), version_id)?;
        let target = self.blobs.read(record.folder(), record.latest())?;

        let delta = self.codec.encode(&target, &source)?;

        tracing::debug!(
            file_id,
            from = %version_id,
            to = %record.latest(),
            delta_bytes = delta.len(),
            "computed delta"
        );

        Ok(delta)
    }

    /// Rebuilds a target from a delta produced by [`VersionStore::get_delta`] and the source
    /// bytes it was computed against.
    pub fn apply_delta(&self, delta: &[u8], dictionary: &[u8]) -> StoreResult<Vec<u8>> {
        Ok(self.codec.decode(delta, dictionary)?)
    }

    /// Forgets every file and deletes every stored blob.
    ///
    /// The empty index is persisted first; afterwards all previously returned version ids are
    /// invalid.
    pub fn reset(&mut self) -> StoreResult<()> {
        let dropped = self.index.len();
        self.index.reset()?;
        self.blobs.clear()?;

        tracing::info!(files = dropped, "reset version store");
        Ok(())
    }

    /// Known file ids, sorted.
    pub fn file_ids(&self) -> Vec<String> {
        self.index.file_ids().map(str::to_owned).collect()
    }

    /// Stored versions of `file_id`, sorted by id.
    pub fn versions(&self, file_id: &str) -> StoreResult<BTreeSet<VersionId>> {
        Ok(self.index.require(file_id)?.versions().clone())
    }

    /// Id of the latest version of `file_id`.
    pub fn latest_version_id(&self, file_id: &str) -> StoreResult<VersionId> {
        Ok(self.index.require(file_id)?.latest().clone())
    }

    /// Total size in bytes of all stored blobs.
    ///
    /// Informational only; [`StoreConfig::max_disc_storage_size`] is never enforced against it.
    pub fn stored_bytes(&self) -> StoreResult<u64> {
        self.blobs.stored_bytes()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self.root, StorageRoot::Temporary(_))
    }

    /// Disposes of the store, removing a temporary root and reporting any failure to do so.
    ///
    /// Dropping the store has the same effect but swallows removal errors.
    pub fn close(self) -> StoreResult<()> {
        match self.root {
            StorageRoot::Temporary(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()
                    .map_err(|e| io_error("remove temporary store", &path, e))
            }
            StorageRoot::Persistent(_) => Ok(()),
        }
    }

    fn require_version(&self, file_id: &str, version_id: &VersionId) -> StoreResult<&FileRecord> {
        let record = self.index.require(file_id)?;
        if !record.contains(version_id) {
            return Err(StoreError::VersionDoesNotExist {
                file_id: file_id.to_owned(),
                version_id: version_id.clone(),
            });
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use std::cell::RefCell;

    fn temp_store() -> VersionStore {
        VersionStore::temporary(StoreConfig::default()).expect("create temporary store")
    }

    /// Codec that records which buffers it was asked to encode.
    #[derive(Debug, Default)]
    struct RecordingCodec {
        last_encode: RefCell<Option<(Vec<u8>, Vec<u8>)>>,
    }

    impl DeltaCodec for RecordingCodec {
        fn encode(&self, target: &[u8], dictionary: &[u8]) -> Result<Vec<u8>, CodecError> {
            *self.last_encode.borrow_mut() = Some((target.to_vec(), dictionary.to_vec()));
            Ok(target.to_vec())
        }

        fn decode(&self, delta: &[u8], _dictionary: &[u8]) -> Result<Vec<u8>, CodecError> {
            Ok(delta.to_vec())
        }
    }

    #[test]
    fn test_add_version_returns_content_hash() {
        let mut store = temp_store();
        let version_id = store.add_version("testFile", b"some text").unwrap();

        assert_eq!(version_id, VersionId::of(b"some text"));
        assert_eq!(version_id.as_str().len(), 64);
    }

    #[test]
    fn test_add_then_get_latest() {
        let mut store = temp_store();

        let cases: Vec<Vec<u8>> = vec![
            b"Plain text content".to_vec(),
            vec![],
            vec![0x00, 0xFF, 0xAA, 0x55, 0x12, 0x34],
            (0..=255).collect(),
        ];

        for content in cases {
            store.add_version("f", &content).unwrap();
            assert_eq!(store.get_latest_version("f").unwrap(), content);
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = temp_store();

        let v1 = store.add_version("f", b"same").unwrap();
        let bytes_after_first = store.stored_bytes().unwrap();
        let v2 = store.add_version("f", b"same").unwrap();

        assert_eq!(v1, v2);
        assert_eq!(store.versions("f").unwrap().len(), 1);
        assert_eq!(store.stored_bytes().unwrap(), bytes_after_first);
    }

    #[test]
    fn test_readding_old_content_moves_latest_back() {
        let mut store = temp_store();
        let v1 = store.add_version("f", b"first").unwrap();
        store.add_version("f", b"second").unwrap();
        let again = store.add_version("f", b"first").unwrap();

        assert_eq!(again, v1);
        assert_eq!(store.latest_version_id("f").unwrap(), v1);
        assert_eq!(store.get_latest_version("f").unwrap(), b"first");
        assert_eq!(store.versions("f").unwrap().len(), 2);
    }

    #[test]
    fn test_has_file() {
        let mut store = temp_store();
        assert!(!store.has_file("fresh"));
        store.add_version("fresh", b"x").unwrap();
        assert!(store.has_file("fresh"));
    }

    #[test]
    fn test_has_version() {
        let mut store = temp_store();
        let fabricated = VersionId::of(b"never stored");

        assert!(matches!(
            store.has_version("unknown", &fabricated),
            Err(StoreError::FileDoesNotExist { .. })
        ));

        let v1 = store.add_version("known", b"stored").unwrap();
        assert!(!store.has_version("known", &fabricated).unwrap());
        assert!(store.has_version("known", &v1).unwrap());
    }

    #[test]
    fn test_get_latest_unknown_file() {
        let store = temp_store();
        match store.get_latest_version("missing") {
            Err(StoreError::FileDoesNotExist { file_id }) => assert_eq!(file_id, "missing"),
            other => panic!("expected FileDoesNotExist, got {:?}", other),
        }
    }

    #[test]
    fn test_get_delta_errors() {
        let mut store = temp_store();
        let v = VersionId::of(b"whatever");

        assert!(matches!(
            store.get_delta("missing", &v),
            Err(StoreError::FileDoesNotExist { .. })
        ));

        store.add_version("doc", b"content").unwrap();
        match store.get_delta("doc", &v) {
            Err(StoreError::VersionDoesNotExist {
                file_id,
                version_id,
            }) => {
                assert_eq!(file_id, "doc");
                assert_eq!(version_id, v);
            }
            other => panic!("expected VersionDoesNotExist, got {:?}", other),
        }
    }

    #[test]
    fn test_version_check_happens_before_disk_read() {
        let mut store = temp_store();
        store.add_version("doc", b"content").unwrap();

        // Removing the blobs would turn any disk read into an I/O error
        fs::remove_dir_all(store.root().join(DATA_DIR_NAME)).unwrap();

        let err = store
            .get_delta("doc", &VersionId::of(b"other"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_doc_scenario() {
        let mut store = temp_store();
        let v1 = store.add_version("doc", b"some text").unwrap();
        let v2 = store.add_version("doc", b"some different text").unwrap();

        assert_ne!(v1, v2);
        assert_eq!(
            store.get_latest_version("doc").unwrap(),
            b"some different text"
        );

        let delta = store.get_delta("doc", &v1).unwrap();
        let decoded = GDeltaCodec.decode(&delta, b"some text").unwrap();
        assert_eq!(decoded, b"some different text");
        assert_eq!(
            store.apply_delta(&delta, b"some text").unwrap(),
            b"some different text"
        );
    }

    #[test]
    fn test_delta_direction_is_named_to_latest() {
        let mut store =
            VersionStore::temporary_with_codec(StoreConfig::default(), RecordingCodec::default())
                .unwrap();
        let v1 = store.add_version("doc", b"old").unwrap();
        store.add_version("doc", b"new").unwrap();

        store.get_delta("doc", &v1).unwrap();

        let (target, dictionary) = store.codec.last_encode.borrow_mut().take().unwrap();
        assert_eq!(target, b"new");
        assert_eq!(dictionary, b"old");
    }

    #[test]
    fn test_delta_against_latest_itself() {
        let mut store = temp_store();
        let v = store.add_version("doc", b"only version").unwrap();

        let delta = store.get_delta("doc", &v).unwrap();
        assert_eq!(
            store.apply_delta(&delta, b"only version").unwrap(),
            b"only version"
        );
    }

    #[test]
    fn test_get_version_reads_history() {
        let mut store = temp_store();
        let v1 = store.add_version("doc", b"v1").unwrap();
        let v2 = store.add_version("doc", b"v2").unwrap();

        assert_eq!(store.get_version("doc", &v1).unwrap(), b"v1");
        assert_eq!(store.get_version("doc", &v2).unwrap(), b"v2");
        assert!(matches!(
            store.get_version("doc", &VersionId::of(b"v3")),
            Err(StoreError::VersionDoesNotExist { .. })
        ));
    }

    #[test]
    fn test_versions_are_scoped_per_file() {
        let mut store = temp_store();
        let a = store.add_version("a", b"shared content").unwrap();
        let b = store.add_version("b", b"shared content").unwrap();
        assert_eq!(a, b);

        store.add_version("a", b"a moves on").unwrap();

        assert_eq!(store.get_latest_version("b").unwrap(), b"shared content");
        assert!(!store
            .has_version("b", &VersionId::of(b"a moves on"))
            .unwrap());
        // Each file keeps its own copy
        assert_eq!(
            store.stored_bytes().unwrap(),
            (b"shared content".len() * 2 + b"a moves on".len()) as u64
        );
    }

    #[test]
    fn test_path_unsafe_file_ids_are_isolated() {
        let mut store = temp_store();
        let ids = ["a/b", "a", "../escape", "..", "/", "", "a\\b", "con:"];

        for (i, id) in ids.iter().enumerate() {
            store.add_version(id, format!("content {}", i).as_bytes()).unwrap();
        }

        for (i, id) in ids.iter().enumerate() {
            assert_eq!(
                store.get_latest_version(id).unwrap(),
                format!("content {}", i).as_bytes()
            );
        }

        // Nothing escaped the data directory
        let data_dir = store.root().join(DATA_DIR_NAME);
        let folders: Vec<_> = fs::read_dir(&data_dir).unwrap().flatten().collect();
        assert_eq!(folders.len(), ids.len());
        for folder in folders {
            let name = folder.file_name().into_string().unwrap();
            assert!(Sha256Hash::is_canonical(&name));
        }
        let root_entries: Vec<_> = fs::read_dir(store.root())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().into_string().unwrap())
            .collect();
        assert_eq!(root_entries.len(), 2, "unexpected root entries: {:?}", root_entries);
    }

    #[test]
    fn test_reset() {
        let mut store = temp_store();
        let v1 = store.add_version("testFile", b"some text").unwrap();
        store.add_version("testFile", b"some different text").unwrap();
        store.add_version("other", b"more").unwrap();

        store.reset().unwrap();

        assert!(!store.has_file("testFile"));
        assert!(!store.has_file("other"));
        assert!(store.file_ids().is_empty());
        assert!(matches!(
            store.get_latest_version("testFile"),
            Err(StoreError::FileDoesNotExist { .. })
        ));
        assert!(matches!(
            store.get_delta("testFile", &v1),
            Err(StoreError::FileDoesNotExist { .. })
        ));
        assert_eq!(store.stored_bytes().unwrap(), 0);

        // Store is usable again afterwards
        let v = store.add_version("testFile", b"some text").unwrap();
        assert_eq!(v, v1);
        assert_eq!(store.versions("testFile").unwrap().len(), 1);
    }

    #[test]
    fn test_failed_index_flush_removes_new_blob() {
        let mut store = temp_store();
        store.add_version("doc", b"first").unwrap();

        // Make the index path a directory so the rename over it fails
        let index_path = store.root().join(INDEX_FILE_NAME);
        fs::remove_file(&index_path).unwrap();
        fs::create_dir(&index_path).unwrap();

        let result = store.add_version("doc", b"second");
        assert!(matches!(result, Err(StoreError::Io(_))));

        let folder = Index::folder_for("doc");
        assert!(!store
            .root()
            .join(DATA_DIR_NAME)
            .join(folder.as_str())
            .join(VersionId::of(b"second").as_str())
            .exists());
        assert_eq!(store.get_latest_version("doc").unwrap(), b"first");

        let result = store.add_version("new-file", b"x");
        assert!(result.is_err());
        assert!(!store.has_file("new-file"));
        assert!(!store
            .root()
            .join(DATA_DIR_NAME)
            .join(Index::folder_for("new-file").as_str())
            .exists());
    }

    #[test]
    fn test_config_is_recorded_not_enforced() {
        let config = StoreConfig::new(4).unwrap();
        let mut store = VersionStore::temporary(config.clone()).unwrap();

        store.add_version("big", b"well over four bytes").unwrap();

        assert_eq!(store.config(), &config);
        assert!(store.stored_bytes().unwrap() > config.max_disc_storage_size());
    }

    #[test]
    fn test_temporary_root_removed_on_drop_and_close() {
        let store = temp_store();
        let root = store.root().to_path_buf();
        assert!(store.is_temporary());
        assert!(root.join(INDEX_FILE_NAME).is_file());
        assert!(root
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(TEMP_DIR_PREFIX));
        drop(store);
        assert!(!root.exists());

        let mut store = temp_store();
        store.add_version("f", b"x").unwrap();
        let root = store.root().to_path_buf();
        store.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_open_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("store");

        let v1;
        {
            let mut store = VersionStore::open(&root, StoreConfig::default()).unwrap();
            assert!(!store.is_temporary());
            v1 = store.add_version("doc", b"some text").unwrap();
            store.add_version("doc", b"some different text").unwrap();
            store.close().unwrap();
        }
        assert!(root.join(INDEX_FILE_NAME).is_file());

        let store = VersionStore::open(&root, StoreConfig::default()).unwrap();
        assert!(store.has_version("doc", &v1).unwrap());
        assert_eq!(
            store.get_latest_version("doc").unwrap(),
            b"some different text"
        );
        let delta = store.get_delta("doc", &v1).unwrap();
        assert_eq!(
            store.apply_delta(&delta, b"some text").unwrap(),
            b"some different text"
        );
    }

    #[test]
    fn test_open_rejects_file_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("file.txt");
        fs::write(&root, "not a directory").unwrap();

        assert!(matches!(
            VersionStore::open(&root, StoreConfig::default()),
            Err(StoreError::InvalidRootDirectory(_))
        ));
    }

    #[test]
    fn test_open_rejects_corrupt_index() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(INDEX_FILE_NAME), r#"{ "files": 5 }"#).unwrap();

        assert!(matches!(
            VersionStore::open(temp.path(), StoreConfig::default()),
            Err(StoreError::IndexDeserialization(_))
        ));
    }
}
