//! Cache-key normalization shared by both caches

/// Store namespace for pokémon records
pub const POKEDEX_NAMESPACE: &str = "pokedex";

/// Store namespace for move descriptions
pub const MOVES_NAMESPACE: &str = "pokemon-moves";

/// Key for a pokémon record in the persisted mapping
pub fn pokemon_key(id: u32) -> String {
    id.to_string()
}

/// Inverse of [`pokemon_key`]. Rejects id 0 and anything non-numeric.
pub fn parse_pokemon_key(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok().filter(|id| *id > 0)
}

/// Key for a move description: the API slug form, so "Razor Wind",
/// "razor wind" and "razor-wind" all share one entry.
pub fn move_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Human-readable label for an API slug ("special-attack" -> "special attack")
pub fn display_label(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pokemon_key_round_trips() {
        assert_eq!(pokemon_key(25), "25");
        assert_eq!(parse_pokemon_key("25"), Some(25));
        assert_eq!(parse_pokemon_key(" 7 "), Some(7));
    }

    #[test]
    fn parse_pokemon_key_rejects_garbage() {
        assert_eq!(parse_pokemon_key("0"), None);
        assert_eq!(parse_pokemon_key("-1"), None);
        assert_eq!(parse_pokemon_key("pikachu"), None);
        assert_eq!(parse_pokemon_key(""), None);
    }

    #[test]
    fn move_key_normalizes_spacing_and_case() {
        assert_eq!(move_key("razor-wind"), "razor-wind");
        assert_eq!(move_key("Razor Wind"), "razor-wind");
        assert_eq!(move_key("  razor   wind "), "razor-wind");
    }

    #[test]
    fn display_label_replaces_dashes() {
        assert_eq!(display_label("special-attack"), "special attack");
        assert_eq!(display_label("hp"), "hp");
    }
}
