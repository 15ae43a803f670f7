use chrono::Utc;
use pokedex_common::keys::move_key;
use pokedex_common::{MoveDescription, PokedexError, Result, MOVES_NAMESPACE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::PersistedMap;
use crate::pokeapi::PokeApiClient;
use crate::store::KeyValueStore;

/// Fetch-through cache of move descriptions keyed by move name.
///
/// At most one lookup runs at a time: a call made while another is in
/// flight returns `Ok(None)` without touching the network or the cache.
pub struct MoveCache {
    api: PokeApiClient,
    entries: PersistedMap<MoveDescription>,
    version_group: String,
    ttl: Option<Duration>,
    busy: AtomicBool,
}

/// Clears the busy flag when the lookup ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MoveCache {
    pub fn new(
        api: PokeApiClient,
        store: Arc<dyn KeyValueStore>,
        version_group: impl Into<String>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            api,
            entries: PersistedMap::new(MOVES_NAMESPACE, store),
            version_group: version_group.into(),
            ttl,
            busy: AtomicBool::new(false),
        }
    }

    /// Canonical lookup URL for a move
    pub fn url_for(&self, move_name: &str) -> String {
        self.api.move_url(&move_key(move_name))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Get the description of `move_name`, fetching `lookup_url` on a miss.
    ///
    /// Returns `Ok(None)` when another lookup is already running. A response
    /// without flavor text for the target version group is cached with the
    /// fallback description.
    pub async fn get(&self, move_name: &str, lookup_url: &str) -> Result<Option<MoveDescription>> {
        if lookup_url.trim().is_empty() {
            return Err(PokedexError::MissingLookupUrl(move_name.to_string()));
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Move lookup in progress, ignoring request for {}", move_name);
            return Ok(None);
        }
        let _guard = BusyGuard(&self.busy);

        let key = move_key(move_name);
        if let Some(entry) = self.entries.get(&key).await {
            if !entry.is_expired(self.ttl, Utc::now()) {
                log::debug!("Cache hit for move {}", key);
                return Ok(Some(entry.value));
            }
            log::info!("Cached move {} expired, refetching", key);
        } else {
            log::info!("Cache miss for move {}, fetching from {}", key, lookup_url);
        }

        let api_move = match self.api.fetch_move(lookup_url).await {
            Ok(api_move) => api_move,
            Err(e) => {
                log::error!("Error fetching move data for {}: {}", key, e);
                return Err(e);
            }
        };

        let description = MoveDescription::new(&key, api_move.description_for(&self.version_group));
        if description.is_fallback() {
            log::debug!("No {} flavor text for move {}", self.version_group, key);
        }

        self.entries.insert(key, description.clone()).await;
        Ok(Some(description))
    }

    /// Whether `move_name` is cached (expired entries included)
    pub async fn contains(&self, move_name: &str) -> bool {
        self.entries.get(&move_key(move_name)).await.is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) -> Result<()> {
        self.entries.clear().await
    }
}

#[cfg(test)]
#[path = "move_cache_tests.rs"]
mod tests;
