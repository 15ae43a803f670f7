//! Tracks which pokémon is currently selected so that results of superseded
//! selections are dropped instead of shown.

use pokedex_common::{PokemonRecord, Result};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::PokemonCache;

/// Outcome of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The record for the most recent selection
    Current(PokemonRecord),
    /// Another selection was made while this one was loading. The record
    /// was still cached.
    Superseded { id: u32 },
}

/// Hands out a generation token per selection; only the latest token's
/// result is delivered.
#[derive(Debug, Default)]
pub struct Selector {
    latest: AtomicU64,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the most recent selection (0 before any)
    pub fn current_token(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Load `id` for display. A selection overtaken by a newer one yields
    /// `Superseded`, whether its fetch succeeded or failed.
    pub async fn select(&self, cache: &PokemonCache, id: u32) -> Result<Selection> {
        let token = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let result = cache.get(id).await;

        if self.current_token() != token {
            log::debug!("Discarding stale result for pokémon {} (token {})", id, token);
            return Ok(Selection::Superseded { id });
        }
        result.map(Selection::Current)
    }
}
