//! Static fallback tables.
//!
//! Used when a live record cannot be fetched. Only Japanese tables ship.

use std::collections::BTreeMap;

const TYPE_NAMES_JA: [(&str, &str); 18] = [
    ("normal", "ノーマル"),
    ("fighting", "かくとう"),
    ("flying", "ひこう"),
    ("poison", "どく"),
    ("ground", "じめん"),
    ("rock", "いわ"),
    ("bug", "むし"),
    ("ghost", "ゴースト"),
    ("steel", "はがね"),
    ("fire", "ほのお"),
    ("water", "みず"),
    ("grass", "くさ"),
    ("electric", "でんき"),
    ("psychic", "エスパー"),
    ("ice", "こおり"),
    ("dragon", "ドラゴン"),
    ("dark", "あく"),
    ("fairy", "フェアリー"),
];

const STAT_NAMES_JA: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "こうげき"),
    ("defense", "ぼうぎょ"),
    ("special-attack", "とくこう"),
    ("special-defense", "とくぼう"),
    ("speed", "すばやさ"),
];

/// English slug to display string mapping.
///
/// Contract: [`get`](Self::get) returns `None` for unknown slugs and never
/// guesses; [`get_or`](Self::get_or) returns the supplied default instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallbackTable {
    entries: BTreeMap<String, String>,
}

impl FallbackTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(slug, display)` pairs. Later pairs win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Japanese names of the 18 battle types.
    pub fn japanese_types() -> Self {
        Self::from_pairs(TYPE_NAMES_JA)
    }

    /// Japanese labels of the six base stats.
    pub fn japanese_stats() -> Self {
        Self::from_pairs(STAT_NAMES_JA)
    }

    /// Display string for `slug`, if listed.
    pub fn get(&self, slug: &str) -> Option<&str> {
        self.entries.get(slug).map(String::as_str)
    }

    /// Display string for `slug`, or `default` when not listed.
    pub fn get_or(&self, slug: &str, default: impl Into<String>) -> String {
        match self.get(slug) {
            Some(value) => value.to_string(),
            None => default.into(),
        }
    }
}

/// Zero-pads a dex number to three digits (`25` -> `"025"`).
pub fn format_pokemon_id(id: u32) -> String {
    format!("{:03}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("fire", Some("ほのお") ; "fire")]
    #[test_case("psychic", Some("エスパー") ; "psychic")]
    #[test_case("stellar", None ; "unlisted type")]
    fn test_japanese_types(slug: &str, expected: Option<&str>) {
        assert_eq!(FallbackTable::japanese_types().get(slug), expected);
    }

    #[test]
    fn test_get_or_contract() {
        let stats = FallbackTable::japanese_stats();
        assert_eq!(stats.get_or("special-attack", "special-attack"), "とくこう");
        assert_eq!(stats.get_or("accuracy", "accuracy"), "accuracy");
        assert_eq!(stats.get("speed"), Some("すばやさ"));
    }

    #[test]
    fn test_from_pairs_later_wins() {
        let table = FallbackTable::from_pairs([("fire", "炎"), ("fire", "ほのお")]);
        assert_eq!(table.get("fire"), Some("ほのお"));
        assert_eq!(FallbackTable::new().get("fire"), None);
    }

    #[test_case(1, "001")]
    #[test_case(25, "025")]
    #[test_case(1025, "1025")]
    fn test_format_pokemon_id(id: u32, expected: &str) {
        assert_eq!(format_pokemon_id(id), expected);
    }
}
