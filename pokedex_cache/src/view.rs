//! Display-ready values derived from a [`PokemonRecord`]

use pokedex_common::keys::display_label;
use pokedex_common::PokemonRecord;
use std::fmt;

/// Sprite groups that hold nested variants rather than a single image
const NESTED_SPRITE_GROUPS: [&str; 2] = ["other", "versions"];

/// Zero-padded pokédex number ("001", "025", "151")
pub fn full_pokedex_number(id: u32) -> String {
    format!("{:03}", id)
}

/// Path of the bundled artwork for a pokémon
pub fn static_image_path(id: u32) -> String {
    format!("/pokemon/{}.png", full_pokedex_number(id))
}

/// `(variant, url)` for every sprite with an image, in variant order
pub fn image_variants(record: &PokemonRecord) -> Vec<(&str, &str)> {
    record
        .sprites
        .iter()
        .filter(|(variant, _)| !NESTED_SPRITE_GROUPS.contains(&variant.as_str()))
        .filter_map(|(variant, url)| match url.as_deref() {
            Some(url) if !url.is_empty() => Some((variant.as_str(), url)),
            _ => None,
        })
        .collect()
}

pub fn sorted_move_names(record: &PokemonRecord) -> Vec<&str> {
    let mut names: Vec<&str> = record.moves.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    names
}

/// Everything the card shows for one pokémon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonView {
    pub number: String,
    pub name: String,
    pub types: Vec<String>,
    pub artwork: String,
    pub images: Vec<(String, String)>,
    /// `(label, base value)`
    pub stats: Vec<(String, u32)>,
    pub moves: Vec<String>,
}

impl From<&PokemonRecord> for PokemonView {
    fn from(record: &PokemonRecord) -> Self {
        PokemonView {
            number: full_pokedex_number(record.id),
            name: record.name.clone(),
            types: record.types.clone(),
            artwork: static_image_path(record.id),
            images: image_variants(record)
                .into_iter()
                .map(|(variant, url)| (variant.to_string(), url.to_string()))
                .collect(),
            stats: record
                .stats
                .iter()
                .map(|s| (display_label(&s.name), s.base_stat))
                .collect(),
            moves: sorted_move_names(record)
                .into_iter()
                .map(display_label)
                .collect(),
        }
    }
}

impl fmt::Display for PokemonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.number, self.name)?;
        writeln!(f, "Types: {}", self.types.join(", "))?;
        writeln!(f, "Artwork: {}", self.artwork)?;
        for (variant, url) in &self.images {
            writeln!(f, "  {}: {}", variant, url)?;
        }
        writeln!(f, "Stats:")?;
        for (label, value) in &self.stats {
            writeln!(f, "  {:<16} {}", label, value)?;
        }
        write!(f, "Moves ({}): {}", self.moves.len(), self.moves.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_common::{MoveRef, StatValue};
    use pretty_assertions::assert_eq;

    fn record() -> PokemonRecord {
        PokemonRecord {
            id: 1,
            name: "bulbasaur".to_string(),
            stats: vec![
                StatValue {
                    name: "hp".to_string(),
                    base_stat: 45,
                },
                StatValue {
                    name: "special-attack".to_string(),
                    base_stat: 65,
                },
            ],
            types: vec!["grass".to_string(), "poison".to_string()],
            abilities: vec!["overgrow".to_string()],
            moves: vec![
                MoveRef {
                    name: "vine-whip".to_string(),
                    url: String::new(),
                },
                MoveRef {
                    name: "cut".to_string(),
                    url: String::new(),
                },
                MoveRef {
                    name: "razor-wind".to_string(),
                    url: String::new(),
                },
            ],
            sprites: [
                ("back_default", Some("https://example.com/b.png")),
                ("front_default", Some("https://example.com/f.png")),
                ("front_shiny", None),
                ("front_female", Some("")),
                ("other", None),
                ("versions", Some("https://example.com/should-not-show.png")),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect(),
        }
    }

    #[test]
    fn pokedex_numbers_are_padded() {
        assert_eq!(full_pokedex_number(1), "001");
        assert_eq!(full_pokedex_number(25), "025");
        assert_eq!(full_pokedex_number(151), "151");
        assert_eq!(full_pokedex_number(1025), "1025");
        assert_eq!(static_image_path(58), "/pokemon/058.png");
    }

    #[test]
    fn image_variants_skip_empty_and_nested() {
        let record = record();
        assert_eq!(
            image_variants(&record),
            vec![
                ("back_default", "https://example.com/b.png"),
                ("front_default", "https://example.com/f.png"),
            ]
        );
    }

    #[test]
    fn moves_are_sorted_by_name() {
        let record = record();
        assert_eq!(sorted_move_names(&record), vec!["cut", "razor-wind", "vine-whip"]);
    }

    #[test]
    fn view_uses_display_labels() {
        let view = PokemonView::from(&record());
        assert_eq!(view.number, "001");
        assert_eq!(view.artwork, "/pokemon/001.png");
        assert_eq!(view.moves, vec!["cut", "razor wind", "vine whip"]);
        assert_eq!(view.stats[1], ("special attack".to_string(), 65));
        assert_eq!(view.images.len(), 2);
    }

    #[test]
    fn view_renders_as_text() {
        let text = PokemonView::from(&record()).to_string();
        assert!(text.starts_with("#001 bulbasaur\n"));
        assert!(text.contains("Types: grass, poison"));
        assert!(text.contains("special attack"));
        assert!(text.ends_with("Moves (3): cut, razor wind, vine whip"));
    }
}
