//! Durable key-value slots backing the favorites store.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::{HerodexError, Result};

/// A store of named string slots, each read and overwritten wholesale
pub trait KeyValueStore {
    /// Current slot content, `None` if the slot was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the slot content; returns once the write is durable
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn storage_error(operation: &'static str, key: &str, path: PathBuf, source: io::Error) -> HerodexError {
        HerodexError::Storage {
            operation,
            key: key.to_string(),
            path,
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::storage_error("read", key, path, e)),
        }
    }

    /// Writes a temp file next to the slot and renames it into place
    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Self::storage_error("create directory for", key, self.dir.clone(), e))?;

        let path = self.slot_path(key);
        let mut temp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| Self::storage_error("create temp file for", key, self.dir.clone(), e))?;
        temp.write_all(value.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| Self::storage_error("write", key, temp.path().to_path_buf(), e))?;
        temp.persist(&path)
            .map_err(|e| Self::storage_error("rename", key, path.clone(), e.error))?;
        Ok(())
    }
}

/// In-process slots; optionally refuses writes to exercise failure paths
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one slot
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.slots.lock().insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HerodexError::Storage {
                operation: "write",
                key: key.to_string(),
                path: PathBuf::from(":memory:"),
                source: io::Error::other("writes disabled"),
            });
        }
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
