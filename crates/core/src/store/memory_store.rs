use std::collections::HashMap;
use std::sync::RwLock;

use super::store_traits::SnapshotStore;
use crate::errors::{Result, StorageError};

/// In-memory snapshot store, used by tests and embedders that do not want
/// anything on disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
