//! Wires the caches, store and client together from a [`Config`]

use pokedex_common::{MoveDescription, Result};
use std::sync::Arc;

use crate::cache::{MoveCache, PokemonCache};
use crate::config::Config;
use crate::pokeapi::PokeApiClient;
use crate::selection::{Selection, Selector};
use crate::store::{FileStore, KeyValueStore};

pub struct Pokedex {
    pub pokemon: PokemonCache,
    pub moves: MoveCache,
    selector: Selector,
}

impl Pokedex {
    /// Caches backed by JSON files in `config.cache_dir`
    pub fn open(config: &Config) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.cache_dir));
        Self::with_store(config, store)
    }

    pub fn with_store(config: &Config, store: Arc<dyn KeyValueStore>) -> Self {
        let api = PokeApiClient::new(config);
        let ttl = config.entry_ttl();
        Self {
            pokemon: PokemonCache::new(api.clone(), Arc::clone(&store), ttl),
            moves: MoveCache::new(api, store, config.target_version_group.clone(), ttl),
            selector: Selector::new(),
        }
    }

    /// Select a pokémon; see [`Selector::select`]
    pub async fn select(&self, id: u32) -> Result<Selection> {
        self.selector.select(&self.pokemon, id).await
    }

    /// Look up a move by name using its canonical URL
    pub async fn describe_move(&self, move_name: &str) -> Result<Option<MoveDescription>> {
        let url = self.moves.url_for(move_name);
        self.moves.get(move_name, &url).await
    }

    /// Empty both caches
    pub async fn clear(&self) -> Result<()> {
        self.pokemon.clear().await?;
        self.moves.clear().await
    }
}
