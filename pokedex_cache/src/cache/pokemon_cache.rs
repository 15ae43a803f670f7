use chrono::Utc;
use pokedex_common::keys::pokemon_key;
use pokedex_common::{PokedexError, PokemonRecord, Result, POKEDEX_NAMESPACE};
use std::sync::Arc;
use std::time::Duration;

use super::PersistedMap;
use crate::pokeapi::PokeApiClient;
use crate::store::KeyValueStore;

/// Fetch-through cache of pokémon records keyed by pokédex id.
///
/// Concurrent `get` calls for the same uncached id each issue their own
/// request; the last one to finish wins the slot.
pub struct PokemonCache {
    api: PokeApiClient,
    entries: PersistedMap<PokemonRecord>,
    ttl: Option<Duration>,
}

impl PokemonCache {
    pub fn new(api: PokeApiClient, store: Arc<dyn KeyValueStore>, ttl: Option<Duration>) -> Self {
        Self {
            api,
            entries: PersistedMap::new(POKEDEX_NAMESPACE, store),
            ttl,
        }
    }

    /// Get a record, fetching and persisting it on a miss.
    /// Failed fetches are logged and leave the cache untouched.
    pub async fn get(&self, id: u32) -> Result<PokemonRecord> {
        if id == 0 {
            return Err(PokedexError::InvalidId(id));
        }

        let key = pokemon_key(id);
        if let Some(entry) = self.entries.get(&key).await {
            if !entry.is_expired(self.ttl, Utc::now()) {
                log::debug!("Cache hit for pokémon {}", id);
                return Ok(entry.value);
            }
            log::info!("Cached pokémon {} expired, refetching", id);
        } else {
            log::info!("Cache miss for pokémon {}, fetching from PokéAPI", id);
        }

        let record = match self.api.fetch_pokemon(id).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error fetching pokémon {}: {}", id, e);
                return Err(e);
            }
        };

        self.entries.insert(key, record.clone()).await;
        Ok(record)
    }

    /// Whether `id` is cached (expired entries included)
    pub async fn contains(&self, id: u32) -> bool {
        self.entries.get(&pokemon_key(id)).await.is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every cached record, ordered by id
    pub async fn cached_records(&self) -> Vec<PokemonRecord> {
        let mut records = self.entries.values().await;
        records.sort_by_key(|record| record.id);
        records
    }

    pub async fn clear(&self) -> Result<()> {
        self.entries.clear().await
    }
}

#[cfg(test)]
#[path = "pokemon_cache_tests.rs"]
mod tests;
