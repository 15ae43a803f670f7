//! Pokédex cache - fetch-through caching of PokéAPI data
//!
//! Pokémon records and move descriptions are fetched from PokéAPI on first
//! use and persisted as JSON in a local key-value store afterwards.

pub mod cache;
pub mod config;
pub mod pokeapi;
pub mod pokedex;
pub mod retry;
pub mod selection;
pub mod store;
pub mod view;

pub use cache::{MoveCache, PokemonCache};
pub use config::Config;
pub use pokeapi::PokeApiClient;
pub use pokedex::Pokedex;
pub use pokedex_common::{MoveDescription, PokedexError, PokemonRecord, Result};
pub use retry::RetryConfig;
pub use selection::{Selection, Selector};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view::PokemonView;
