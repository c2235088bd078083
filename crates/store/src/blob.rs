//! Content-addressed blob files.
//!
//! Blobs live at `data/<folder>/<version_id>`, where both path segments are canonical SHA-256
//! hex digests. Nothing here consults the index; callers decide *whether* a blob should be
//! written or read, this module only decides *where* and does the I/O.

use crate::constants::TEMP_SUFFIX;
use crate::{io_error, StoreResult, VersionId};
use dh_checksum::Sha256Hash;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub(crate) struct BlobStore {
    data_dir: PathBuf,
}

impl BlobStore {
    pub(crate) fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Creates the data directory if it is missing.
    pub(crate) fn ensure_data_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| io_error("create data directory", &self.data_dir, e))
    }

    #[allow(dead_code)]
    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn folder_path(&self, folder: &Sha256Hash) -> PathBuf {
        self.data_dir.join(folder.as_str())
    }

    pub(crate) fn blob_path(&self, folder: &Sha256Hash, version_id: &VersionId) -> PathBuf {
        self.folder_path(folder).join(version_id.as_str())
    }

    /// Creates a file's folder. Returns `false` if it already existed.
    pub(crate) fn create_folder(&self, folder: &Sha256Hash) -> StoreResult<bool> {
        let path = self.folder_path(folder);
        match fs::create_dir(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
            Err(e) => Err(io_error("create file folder", &path, e)),
        }
    }

    /// Writes `content` under its version id unless a blob is already there.
    ///
    /// The bytes go to a temporary sibling first and are renamed into place, so a reader never
    /// sees a partially written blob. Returns `false` when the blob already existed and nothing
    /// was written.
    pub(crate) fn write_once(
        &self,
        folder: &Sha256Hash,
        version_id: &VersionId,
        content: &[u8],
    ) -> StoreResult<bool> {
        let path = self.blob_path(folder, version_id);
        if path.exists() {
            return Ok(false);
        }

        let temp_path = self
            .folder_path(folder)
            .join(format!(".{}{}", version_id, TEMP_SUFFIX));

        fs::write(&temp_path, content).map_err(|e| io_error("write blob", &temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(io_error("move blob into place at", &path, e));
        }

        Ok(true)
    }

    pub(crate) fn read(&self, folder: &Sha256Hash, version_id: &VersionId) -> StoreResult<Vec<u8>> {
        let path = self.blob_path(folder, version_id);
        fs::read(&path).map_err(|e| io_error("read blob", &path, e))
    }

    pub(crate) fn remove(&self, folder: &Sha256Hash, version_id: &VersionId) -> StoreResult<()> {
        let path = self.blob_path(folder, version_id);
        fs::remove_file(&path).map_err(|e| io_error("remove blob", &path, e))
    }

    pub(crate) fn remove_folder(&self, folder: &Sha256Hash) -> StoreResult<()> {
        let path = self.folder_path(folder);
        fs::remove_dir_all(&path).map_err(|e| io_error("remove file folder", &path, e))
    }

    /// Deletes every blob and recreates an empty data directory.
    pub(crate) fn clear(&self) -> StoreResult<()> {
        match fs::remove_dir_all(&self.data_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_error("remove data directory", &self.data_dir, e)),
        }
        fs::create_dir(&self.data_dir)
            .map_err(|e| io_error("recreate data directory", &self.data_dir, e))
    }

    /// Sum of blob sizes under the data directory.
    pub(crate) fn stored_bytes(&self) -> StoreResult<u64> {
        let mut total = 0u64;
        let folders = fs::read_dir(&self.data_dir)
            .map_err(|e| io_error("list data directory", &self.data_dir, e))?;

        for folder in folders {
            let folder = folder.map_err(|e| io_error("list data directory", &self.data_dir, e))?;
            let folder_path = folder.path();
            if !folder_path.is_dir() {
                continue;
            }

            let blobs = fs::read_dir(&folder_path)
                .map_err(|e| io_error("list file folder", &folder_path, e))?;
            for blob in blobs {
                let blob = blob.map_err(|e| io_error("list file folder", &folder_path, e))?;
                let metadata = blob
                    .metadata()
                    .map_err(|e| io_error("stat blob", &blob.path(), e))?;
                if metadata.is_file() {
                    total = total.saturating_add(metadata.len());
                }
            }
        }

        Ok(total)
    }
}
