//! PokeAPI resource records.
//!
//! Only the subset of fields the localizer and the CLI read is modelled;
//! serde ignores the rest. Every collection defaults to empty so partial
//! fixtures deserialize.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// A `{ name, url }` link to another resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    /// Resource slug
    pub name: String,
    /// Absolute URL of the resource
    #[serde(default)]
    pub url: String,
}

impl NamedApiResource {
    /// Pokémon id parsed from the resource URL.
    pub fn pokemon_id(&self) -> Option<u32> {
        extract_id_from_resource_url(&self.url)
    }
}

/// A link where only the name is used (language, stat, type, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    /// Resource slug
    pub name: String,
}

/// Unnamed link, e.g. `evolution_chain`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    /// Absolute URL of the resource
    pub url: String,
}

/// One translation of a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    /// Language of this entry
    pub language: NameRef,
    /// Translated name
    pub name: String,
}

impl LocalizedName {
    /// Builds an entry for `locale`.
    pub fn new(locale: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language: NameRef { name: locale.into() },
            name: name.into(),
        }
    }
}

/// Records carrying a per-language `names` array.
pub trait LocalizedNames {
    /// All translations of this record's name.
    fn names(&self) -> &[LocalizedName];

    /// The name whose language code is exactly `locale`.
    ///
    /// No other language is substituted when `locale` is absent.
    fn name_in(&self, locale: &str) -> Option<&str> {
        self.names()
            .iter()
            .find(|n| n.language.name == locale)
            .map(|n| n.name.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LIST
// ═══════════════════════════════════════════════════════════════════════════════

/// One page of `/pokemon?limit=N&offset=M`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListResponse {
    /// Total number of Pokémon
    pub count: u32,
    /// URL of the next page
    pub next: Option<String>,
    /// URL of the previous page
    pub previous: Option<String>,
    /// Entries on this page
    #[serde(default)]
    pub results: Vec<NamedApiResource>,
}

impl PokemonListResponse {
    /// Number of pages of size `limit`, never less than one.
    pub fn page_count(&self, limit: u32) -> u32 {
        if limit == 0 {
            return 1;
        }
        self.count.div_ceil(limit).max(1)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETAIL
// ═══════════════════════════════════════════════════════════════════════════════

/// `/pokemon/{idOrName}` record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    /// National dex number
    pub id: u32,
    /// English slug
    pub name: String,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Sprite URLs
    #[serde(default)]
    pub sprites: Sprites,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Types ordered by slot
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    /// Abilities
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
}

impl PokemonDetail {
    /// Type slugs in slot order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&PokemonTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// Sprite URLs of a Pokémon.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    /// Default front sprite
    pub front_default: Option<String>,
    /// Alternative artwork sets
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl Sprites {
    /// Official artwork when present, else the default front sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.front_default.as_deref())
    }
}

/// The `sprites.other` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    /// High-resolution official artwork
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprite>,
}

/// A single artwork sprite.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkSprite {
    /// Front image URL
    pub front_default: Option<String>,
}

/// A base stat entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value
    pub base_stat: u32,
    /// Stat slug (`hp`, `attack`, ...)
    pub stat: NameRef,
}

/// A type slot entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTypeSlot {
    /// 1-based slot
    pub slot: u8,
    /// Type slug
    #[serde(rename = "type")]
    pub kind: NameRef,
}

/// An ability entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    /// Whether this is the hidden ability
    #[serde(default)]
    pub is_hidden: bool,
    /// Ability slug
    pub ability: NameRef,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPECIES
// ═══════════════════════════════════════════════════════════════════════════════

/// `/pokemon-species/{idOrName}` record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    /// Pokédex color
    #[serde(default)]
    pub color: NameRef,
    /// Pokédex entries per game and language
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    /// Category ("Mouse Pokémon") per language
    #[serde(default)]
    pub genera: Vec<Genus>,
    /// Evolution chain link
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
    /// Name per language
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

impl PokemonSpecies {
    /// Category in `locale`.
    pub fn genus_in(&self, locale: &str) -> Option<&str> {
        self.genera
            .iter()
            .find(|g| g.language.name == locale)
            .map(|g| g.genus.as_str())
    }

    /// First Pokédex entry in `locale`, with the API's hard line breaks removed.
    pub fn flavor_text_in(&self, locale: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|f| f.language.name == locale)
            .map(|f| f.flavor_text.replace(['\n', '\u{c}'], " "))
    }
}

impl LocalizedNames for PokemonSpecies {
    fn names(&self) -> &[LocalizedName] {
        &self.names
    }
}

/// A Pokédex entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    /// Language of the entry
    pub language: NameRef,
    /// Entry text
    pub flavor_text: String,
}

/// A species category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genus {
    /// Language of the entry
    pub language: NameRef,
    /// Category text
    pub genus: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE
// ═══════════════════════════════════════════════════════════════════════════════

/// `/type/{idOrName}` record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDetail {
    /// Type id
    #[serde(default)]
    pub id: u32,
    /// English slug
    #[serde(default)]
    pub name: String,
    /// Name per language
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

impl LocalizedNames for TypeDetail {
    fn names(&self) -> &[LocalizedName] {
        &self.names
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Extracts the id from a list entry URL (`.../pokemon/25/` -> `25`).
///
/// Returns `None` for any other resource kind.
pub fn extract_id_from_resource_url(url: &str) -> Option<u32> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let (head, tail) = trimmed.rsplit_once('/')?;
    if !head.ends_with("/pokemon") || tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}
