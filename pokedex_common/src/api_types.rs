//! PokéAPI response types
//!
//! Only the fields the caches use are declared; everything else in the
//! (large) responses is ignored by serde.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{MoveRef, PokemonRecord, StatValue};

/// `{ "name": ..., "url": ... }` reference used all over PokéAPI
#[derive(Debug, Deserialize, Clone)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// `pokemon/{id}` response
#[derive(Debug, Deserialize)]
pub struct ApiPokemon {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub stats: Vec<ApiStat>,
    #[serde(default)]
    pub types: Vec<ApiTypeSlot>,
    #[serde(default)]
    pub abilities: Vec<ApiAbilitySlot>,
    #[serde(default)]
    pub moves: Vec<ApiMoveSlot>,
    #[serde(default)]
    pub sprites: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct ApiTypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct ApiAbilitySlot {
    #[serde(default)]
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct ApiMoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

impl ApiPokemon {
    /// Convert into the cached record. `requested_id` is used when the
    /// response does not carry its own id.
    pub fn into_record(self, requested_id: u32) -> PokemonRecord {
        let mut types = self.types;
        types.sort_by_key(|t| t.slot);

        let mut abilities = self.abilities;
        abilities.sort_by_key(|a| a.slot);

        let sprites: BTreeMap<String, Option<String>> = self
            .sprites
            .into_iter()
            .map(|(variant, value)| {
                let url = match value {
                    serde_json::Value::String(url) => Some(url),
                    _ => None,
                };
                (variant, url)
            })
            .collect();

        PokemonRecord {
            id: self.id.unwrap_or(requested_id),
            name: self.name,
            stats: self
                .stats
                .into_iter()
                .map(|s| StatValue {
                    name: s.stat.name,
                    base_stat: s.base_stat,
                })
                .collect(),
            types: types.into_iter().map(|t| t.kind.name).collect(),
            abilities: abilities.into_iter().map(|a| a.ability.name).collect(),
            moves: self
                .moves
                .into_iter()
                .map(|m| MoveRef {
                    name: m.move_ref.name,
                    url: m.move_ref.url,
                })
                .collect(),
            sprites,
        }
    }
}

/// `move/{name}` response
#[derive(Debug, Deserialize)]
pub struct ApiMove {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<ApiFlavorText>,
}

#[derive(Debug, Deserialize)]
pub struct ApiFlavorText {
    pub flavor_text: String,
    pub version_group: NamedResource,
}

impl ApiMove {
    /// Flavor text of the first entry for `version_group`. Line breaks and
    /// form feeds are collapsed.
    pub fn description_for(&self, version_group: &str) -> Option<String> {
        let chosen = self
            .flavor_text_entries
            .iter()
            .find(|entry| entry.version_group.name == version_group)?;

        let text = chosen.flavor_text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
