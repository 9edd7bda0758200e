//! Durable key-value storage backing the session
//!
//! Reads are fail-soft: anything missing or unreadable comes back as `None`.
//! Writes report failures so the caller can decide whether to care.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use std::sync::Arc;

/// A string key-value store that outlives a single page load or process
pub trait Storage: Send + Sync {
    /// Read a value, `None` if it is absent or cannot be read
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Write several entries. Backends that can should apply them in one step.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several entries. Backends that can should apply them in one step.
    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Build the storage backend selected in the configuration
pub fn from_config(config: &StorageConfig) -> Arc<dyn Storage> {
    match config.backend {
        StorageBackend::File => Arc::new(FileStorage::new(config.path.clone())),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    }
}
