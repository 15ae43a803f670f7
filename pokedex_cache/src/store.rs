//! Durable key-value stores holding one serialized blob per namespace

use pokedex_common::Result;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Namespace-keyed text store. Each namespace holds one serialized mapping
/// that is replaced wholesale on write.
pub trait KeyValueStore: Send + Sync {
    /// Read a namespace. `Ok(None)` when it was never written.
    fn get(&self, namespace: &str) -> Result<Option<String>>;

    /// Replace the contents of a namespace
    fn set(&self, namespace: &str, value: &str) -> Result<()>;

    /// Drop a namespace. Removing a missing namespace is not an error.
    fn remove(&self, namespace: &str) -> Result<()>;

    /// Human-readable name of this store (for logging)
    fn name(&self) -> &str;
}

/// Stores each namespace as `<dir>/<namespace>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        log::info!("Cache directory: {}", dir.display());
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, namespace: &str) -> Result<Option<String>> {
        let path = self.path(namespace);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, namespace: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Uniquely named temp file in the same dir, renamed over the target
        let path = self.path(namespace);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        match std::fs::remove_file(self.path(namespace)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// In-process store, used for tests and for running without a cache directory
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one namespace
    pub fn with_namespace(namespace: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .namespaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str) -> Result<Option<String>> {
        let namespaces = self.namespaces.read().unwrap_or_else(PoisonError::into_inner);
        Ok(namespaces.get(namespace).cloned())
    }

    fn set(&self, namespace: &str, value: &str) -> Result<()> {
        self.namespaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(namespace.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        self.namespaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(namespace);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
