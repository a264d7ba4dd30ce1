//! File-backed storage implementation for Cambio.
//!
//! This crate implements the [`SnapshotStore`] trait from `cambio-core` on
//! top of plain JSON files, one per key, under a configurable directory. It
//! is the only crate in the workspace that touches the filesystem; everything
//! else works with the trait.
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a crash mid-write never leaves a truncated cache entry behind.

mod errors;

pub use errors::FileStoreError;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use cambio_core::store::SnapshotStore;
use cambio_core::Result;

/// Snapshot store keeping each key in `<dir>/<key>.json`.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| FileStoreError::Write(dir.display().to_string(), e))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> std::result::Result<PathBuf, FileStoreError> {
        // Keys are store identifiers, not paths.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(FileStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileStoreError::Read(path.display().to_string(), e).into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = tmp_path(&path);

        fs::write(&tmp, value)
            .map_err(|e| FileStoreError::Write(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| FileStoreError::Write(path.display().to_string(), e))?;

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
