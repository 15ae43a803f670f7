//! Cached record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::keys::display_label;

/// Description used when the API has no flavor text for the target version group
pub const NO_DESCRIPTION: &str = "No description available.";

/// Snapshot of one pokémon as returned by `pokemon/{id}`. Never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    pub stats: Vec<StatValue>,
    /// Type labels in slot order
    pub types: Vec<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    pub moves: Vec<MoveRef>,
    /// Image URL per sprite variant. `None` for missing images and for
    /// nested groups such as `other` and `versions`.
    pub sprites: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub base_stat: u32,
}

/// A move the pokémon can learn, with the endpoint describing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRef {
    pub name: String,
    pub url: String,
}

/// Flavor text for one move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescription {
    /// API slug, e.g. "razor-wind"
    pub name: String,
    /// Slug with dashes replaced, e.g. "razor wind"
    pub display_name: String,
    pub description: String,
}

impl MoveDescription {
    pub fn new(name: &str, description: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_label(name),
            description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }

    /// Whether this entry carries the fallback text rather than real flavor text
    pub fn is_fallback(&self) -> bool {
        self.description == NO_DESCRIPTION
    }
}

/// A cached value together with the time it was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    pub fetched_at: DateTime<Utc>,
    pub value: T,
}

impl<T> CachedEntry<T> {
    pub fn new(value: T) -> Self {
        Self {
            fetched_at: Utc::now(),
            value,
        }
    }

    /// Whether the entry is older than `ttl` at `now`. `None` never expires.
    pub fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        let Some(ttl) = ttl else {
            return false;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.fetched_at) > ttl,
            // Out-of-range TTL: treat as never expiring
            Err(_) => false,
        }
    }
}
