//! Shared types for the Pokédex cache.
//!
//! Holds the PokéAPI wire types, the cached record types, the error type and
//! the cache-key helpers used by both the pokémon and the move caches.

pub mod api_types;
pub mod error;
pub mod keys;
pub mod models;

pub use api_types::{ApiMove, ApiPokemon};
pub use error::{PokedexError, Result};
pub use keys::{MOVES_NAMESPACE, POKEDEX_NAMESPACE};
pub use models::{CachedEntry, MoveDescription, MoveRef, PokemonRecord, StatValue, NO_DESCRIPTION};
