//! Fetch-through caches for pokémon records and move descriptions

pub mod move_cache;
pub mod pokemon_cache;

pub use move_cache::MoveCache;
pub use pokemon_cache::PokemonCache;

use pokedex_common::CachedEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::KeyValueStore;

type Entries<T> = BTreeMap<String, CachedEntry<T>>;

/// One store namespace mirrored in memory.
///
/// The in-memory map is the source of truth: it is read from the store once,
/// on first use, and every insert rewrites the whole namespace while the
/// lock is held, so concurrent inserts never drop each other's entries.
pub(crate) struct PersistedMap<T> {
    namespace: &'static str,
    store: Arc<dyn KeyValueStore>,
    entries: Mutex<Option<Entries<T>>>,
}

impl<T> PersistedMap<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub(crate) fn new(namespace: &'static str, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            namespace,
            store,
            entries: Mutex::new(None),
        }
    }

    /// Run a store operation on the blocking pool
    async fn with_store<R, F>(&self, op: F) -> pokedex_common::Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&dyn KeyValueStore, &str) -> pokedex_common::Result<R> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let namespace = self.namespace;
        tokio::task::spawn_blocking(move || op(store.as_ref(), namespace))
            .await
            .map_err(std::io::Error::other)?
    }

    /// Read the namespace from the store. Absent or unreadable data is an
    /// empty cache.
    async fn load(&self) -> Entries<T> {
        let content = match self.with_store(|store, namespace| store.get(namespace)).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                log::info!("Starting with empty '{}' cache", self.namespace);
                return Entries::new();
            }
            Err(e) => {
                log::warn!(
                    "Failed to read '{}' from {} store, starting fresh: {}",
                    self.namespace,
                    self.store.name(),
                    e
                );
                return Entries::new();
            }
        };

        match serde_json::from_str::<Entries<T>>(&content) {
            Ok(entries) => {
                log::info!(
                    "Loaded '{}' cache with {} entries",
                    self.namespace,
                    entries.len()
                );
                entries
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse '{}' cache, starting fresh: {}",
                    self.namespace,
                    e
                );
                Entries::new()
            }
        }
    }

    async fn loaded<'a>(&self, slot: &'a mut Option<Entries<T>>) -> &'a mut Entries<T> {
        if slot.is_none() {
            *slot = Some(self.load().await);
        }
        slot.get_or_insert_with(Entries::new)
    }

    pub(crate) async fn get(&self, key: &str) -> Option<CachedEntry<T>> {
        let mut guard = self.entries.lock().await;
        self.loaded(&mut guard).await.get(key).cloned()
    }

    /// Insert and persist. A failed write is logged; the entry stays cached
    /// in memory either way.
    pub(crate) async fn insert(&self, key: String, value: T) {
        let mut guard = self.entries.lock().await;
        let entries = self.loaded(&mut guard).await;
        entries.insert(key, CachedEntry::new(value));
        let count = entries.len();

        let saved = match serde_json::to_string(&*entries) {
            Ok(content) => {
                self.with_store(move |store, namespace| store.set(namespace, &content))
                    .await
            }
            Err(e) => Err(e.into()),
        };
        match saved {
            Ok(()) => log::debug!("Saved '{}' cache with {} entries", self.namespace, count),
            Err(e) => log::warn!("Failed to save '{}' cache: {}", self.namespace, e),
        }
    }

    pub(crate) async fn len(&self) -> usize {
        let mut guard = self.entries.lock().await;
        self.loaded(&mut guard).await.len()
    }

    pub(crate) async fn values(&self) -> Vec<T> {
        let mut guard = self.entries.lock().await;
        self.loaded(&mut guard)
            .await
            .values()
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Forget every entry, in memory and in the store
    pub(crate) async fn clear(&self) -> pokedex_common::Result<()> {
        let mut guard = self.entries.lock().await;
        self.with_store(|store, namespace| store.remove(namespace))
            .await?;
        *guard = Some(Entries::new());
        log::info!("Cleared '{}' cache", self.namespace);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};

    #[tokio::test]
    async fn corrupt_namespace_loads_empty() {
        let store = Arc::new(MemoryStore::with_namespace("pokedex", "{not json"));
        let map: PersistedMap<String> = PersistedMap::new("pokedex", store);

        assert_eq!(map.len().await, 0);
        assert!(map.get("1").await.is_none());
    }

    #[tokio::test]
    async fn insert_rewrites_whole_namespace() {
        let store = Arc::new(MemoryStore::new());
        let map: PersistedMap<String> = PersistedMap::new("pokedex", store.clone());

        map.insert("1".to_string(), "bulbasaur".to_string()).await;
        map.insert("2".to_string(), "ivysaur".to_string()).await;

        let content = store.get("pokedex").unwrap().unwrap();
        let persisted: Entries<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted["2"].value, "ivysaur");
    }

    #[tokio::test]
    async fn reloads_from_store_in_new_instance() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        {
            let map: PersistedMap<String> = PersistedMap::new("pokedex", Arc::clone(&store));
            map.insert("1".to_string(), "bulbasaur".to_string()).await;
        }

        let map: PersistedMap<String> = PersistedMap::new("pokedex", store);
        assert_eq!(map.get("1").await.unwrap().value, "bulbasaur");
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_persisted() {
        let store = Arc::new(MemoryStore::new());
        let map: Arc<PersistedMap<u32>> = Arc::new(PersistedMap::new("pokedex", store.clone()));

        let handles: Vec<_> = (1..=20u32)
            .map(|id| {
                let map = Arc::clone(&map);
                tokio::spawn(async move { map.insert(id.to_string(), id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let content = store.get("pokedex").unwrap().unwrap();
        let persisted: Entries<u32> = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted.len(), 20);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_backed_inserts_keep_runtime_responsive() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(temp_dir.path()));
        let map: Arc<PersistedMap<u32>> =
            Arc::new(PersistedMap::new("pokedex", Arc::clone(&store)));

        let handles: Vec<_> = (1..=10u32)
            .map(|id| {
                let map = Arc::clone(&map);
                tokio::spawn(async move { map.insert(id.to_string(), id).await })
            })
            .collect();
        // A timer still fires while the inserts write to disk
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await
        })
        .await
        .unwrap();
        for handle in handles {
            handle.await.unwrap();
        }

        let reloaded: PersistedMap<u32> = PersistedMap::new("pokedex", store);
        assert_eq!(reloaded.len().await, 10);
        assert_eq!(reloaded.get("7").await.unwrap().value, 7);
    }

    #[tokio::test]
    async fn clear_drops_namespace() {
        let store = Arc::new(MemoryStore::new());
        let map: PersistedMap<String> = PersistedMap::new("pokemon-moves", store.clone());
        map.insert("tackle".to_string(), "Charges.".to_string()).await;

        map.clear().await.unwrap();

        assert_eq!(map.len().await, 0);
        assert_eq!(store.get("pokemon-moves").unwrap(), None);
    }
}
