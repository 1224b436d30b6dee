//! Localizer combining the PokeAPI client, the localization cache and the
//! static fallback tables.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use pokedex_cache::{CacheConfig, CleanupHandle, LocalizationCache, Resolution};
use pokedex_client::{ClientConfig, PokeApiClient};
use pokedex_core::constants::{DEFAULT_LOCALE, PENDING_SUFFIX};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResourceSource;
use pokedex_core::types::{
    CacheKey, LocalizedNames, PokemonDetail, PokemonSpecies, ResourceId, TypeDetail,
};

use crate::tables::FallbackTable;

/// Localizer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// PokeAPI client configuration
    pub client: ClientConfig,
    /// Cache TTLs and sweep interval
    pub cache: CacheConfig,
    /// Language code selected from `names` arrays
    pub locale: String,
    /// Appended to an identifier whose localized name is unavailable
    pub pending_suffix: String,
    /// Whether to run the periodic expired-entry sweep
    pub enable_cleanup: bool,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            cache: CacheConfig::default(),
            locale: DEFAULT_LOCALE.into(),
            pending_suffix: PENDING_SUFFIX.into(),
            enable_cleanup: true,
        }
    }
}

impl LocalizerConfig {
    /// Reads overrides from the environment, loading `.env` first.
    ///
    /// Recognized: `POKEAPI_BASE_URL`, `POKEDEX_LOCALE`,
    /// `POKEDEX_CACHE_TTL_SECS`, `POKEDEX_FALLBACK_TTL_SECS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `var`.
    pub fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = var("POKEAPI_BASE_URL") {
            self.client.base_url = url;
        }
        if let Some(locale) = var("POKEDEX_LOCALE") {
            self.locale = locale;
        }
        if let Some(ttl) = var("POKEDEX_CACHE_TTL_SECS") {
            self.cache.default_ttl_seconds = parse_seconds("POKEDEX_CACHE_TTL_SECS", &ttl)?;
        }
        if let Some(ttl) = var("POKEDEX_FALLBACK_TTL_SECS") {
            self.cache.fallback_ttl_seconds = parse_seconds("POKEDEX_FALLBACK_TTL_SECS", &ttl)?;
        }
        Ok(self)
    }

    /// Points the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.base_url = base_url.into();
        self
    }

    /// Selects another target language.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Disables the periodic sweep.
    pub fn no_cleanup(mut self) -> Self {
        self.enable_cleanup = false;
        self
    }
}

fn parse_seconds(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| PokedexError::ConfigError(format!("{} must be a number of seconds, got '{}'", name, raw)))
}

/// Display-name resolver for Pokémon and types.
///
/// Resolves names by:
/// 1. Reading the shared [`LocalizationCache`]
/// 2. Fetching the species or type record and selecting the target language
/// 3. Falling back to the static table, if the kind has one
/// 4. Falling back to the raw identifier plus the pending suffix
pub struct Localizer<S = PokeApiClient> {
    source: S,
    cache: Arc<LocalizationCache>,
    type_table: FallbackTable,
    stat_table: FallbackTable,
    locale: String,
    pending_suffix: String,
    _cleanup: Option<CleanupHandle>,
}

impl Localizer<PokeApiClient> {
    /// Creates a localizer backed by the live PokeAPI.
    ///
    /// The periodic sweep only starts when called inside a tokio runtime.
    pub fn with_config(config: LocalizerConfig) -> Result<Self> {
        let client = PokeApiClient::with_config(config.client.clone())?;
        let cache = Arc::new(LocalizationCache::with_config(config.cache.clone()));

        let cleanup = if config.enable_cleanup {
            if tokio::runtime::Handle::try_current().is_ok() {
                Some(cache.spawn_cleanup(config.cache.cleanup_interval()))
            } else {
                warn!("No tokio runtime, periodic cache cleanup disabled");
                None
            }
        } else {
            None
        };

        let mut localizer = Self::new(client, cache)
            .with_locale(config.locale)
            .with_pending_suffix(config.pending_suffix);
        localizer._cleanup = cleanup;
        Ok(localizer)
    }
}

impl<S: ResourceSource> Localizer<S> {
    /// Creates a localizer over any record source and a shared cache.
    pub fn new(source: S, cache: Arc<LocalizationCache>) -> Self {
        Self {
            source,
            cache,
            type_table: FallbackTable::japanese_types(),
            stat_table: FallbackTable::japanese_stats(),
            locale: DEFAULT_LOCALE.into(),
            pending_suffix: PENDING_SUFFIX.into(),
            _cleanup: None,
        }
    }

    /// Selects the target language. Static tables only apply to `ja`.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        if self.locale == DEFAULT_LOCALE {
            self.type_table = FallbackTable::japanese_types();
            self.stat_table = FallbackTable::japanese_stats();
        } else {
            self.type_table = FallbackTable::new();
            self.stat_table = FallbackTable::new();
        }
        self
    }

    /// Sets the pending suffix; an empty suffix yields the raw identifier.
    pub fn with_pending_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.pending_suffix = suffix.into();
        self
    }

    /// Returns the target language.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &Arc<LocalizationCache> {
        &self.cache
    }

    /// Returns the record source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Clears the shared cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn pending(&self, id: impl fmt::Display) -> String {
        format!("{}{}", id, self.pending_suffix)
    }

    /// Localized Pokémon name, never failing.
    pub async fn pokemon_name(&self, id: impl Into<ResourceId>) -> String {
        self.pokemon_name_detailed(id).await.value
    }

    /// Localized Pokémon name with resolution metadata.
    ///
    /// Keyed by the id or name as given.
    #[instrument(skip(self, id), fields(id))]
    pub async fn pokemon_name_detailed(&self, id: impl Into<ResourceId>) -> Resolution {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let locale = self.locale.as_str();

        self.cache
            .resolve_detailed(
                &id,
                || self.source.pokemon_species(&id),
                |species: &PokemonSpecies| species.name_in(locale).map(str::to_owned),
                self.pending(&id),
            )
            .await
    }

    /// Localized type name, never failing.
    pub async fn type_name(&self, type_name: &str) -> String {
        self.type_name_detailed(type_name).await.value
    }

    /// Localized type name with resolution metadata.
    ///
    /// Keyed as `type_{name}`; falls back to the static table, then the raw name.
    /// A name that is not a valid identifier is never sent to the source.
    #[instrument(skip(self))]
    pub async fn type_name_detailed(&self, type_name: &str) -> Resolution {
        let id = type_name.parse::<ResourceId>();
        let locale = self.locale.as_str();
        let fallback = self.type_table.get_or(type_name, self.pending(type_name));
        let source = &self.source;

        self.cache
            .resolve_detailed(
                CacheKey::for_type(type_name),
                move || async move {
                    match id {
                        Ok(id) => source.type_detail(&id).await,
                        Err(e) => Err(e),
                    }
                },
                |detail: &TypeDetail| detail.name_in(locale).map(str::to_owned),
                fallback,
            )
            .await
    }

    /// Localizes several type names concurrently, keeping input order.
    pub async fn type_names<T: AsRef<str>>(&self, type_names: &[T]) -> Vec<(String, String)> {
        join_all(type_names.iter().map(|name| async move {
            let name = name.as_ref();
            (name.to_string(), self.type_name(name).await)
        }))
        .await
    }

    /// Localized label of a base stat (`special-attack` -> `とくこう`).
    pub fn stat_label(&self, stat: &str) -> String {
        self.stat_table.get_or(stat, stat)
    }

    /// Languages tried for species text, most preferred first.
    ///
    /// Japanese prefers the kana form (`ja-Hrkt`); every locale ends on English.
    fn text_locales(&self) -> Vec<&str> {
        let mut locales = Vec::with_capacity(3);
        if self.locale == DEFAULT_LOCALE {
            locales.push("ja-Hrkt");
        }
        locales.push(self.locale.as_str());
        if self.locale != "en" {
            locales.push("en");
        }
        locales
    }

    /// Detail record with its localized name, category, Pokédex entry, types
    /// and stat labels.
    ///
    /// The detail and species records are fetched concurrently and the name
    /// is cached from the fetched species. A failed detail fetch is returned
    /// as an error; a failed species fetch only leaves the text fields empty.
    #[instrument(skip(self, id), fields(id))]
    pub async fn pokemon_detail_localized(&self, id: impl Into<ResourceId>) -> Result<LocalizedPokemon> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let locale = self.locale.as_str();

        let (detail, species) = futures::join!(
            self.source.pokemon_detail(&id),
            self.source.pokemon_species(&id)
        );
        let detail = detail?;

        let localized_name = self
            .cache
            .resolve(
                &id,
                || std::future::ready(species.as_ref()),
                |species: &&PokemonSpecies| species.name_in(locale).map(str::to_owned),
                self.pending(&id),
            )
            .await;

        let text_locales = self.text_locales();
        let (genus, flavor_text) = match &species {
            Ok(species) => (
                text_locales
                    .iter()
                    .find_map(|l| species.genus_in(l))
                    .map(str::to_owned),
                text_locales.iter().find_map(|l| species.flavor_text_in(l)),
            ),
            Err(_) => (None, None),
        };

        let types = self.type_names(&detail.type_names()).await;
        let stats = detail
            .stats
            .iter()
            .map(|s| LocalizedStat {
                name: s.stat.name.clone(),
                label: self.stat_label(&s.stat.name),
                base_stat: s.base_stat,
            })
            .collect();

        info!(id = detail.id, name = %localized_name, "Localized Pokémon detail");

        Ok(LocalizedPokemon {
            localized_name,
            genus,
            flavor_text,
            types,
            stats,
            detail,
        })
    }

    /// One page of the Pokémon list with localized names.
    ///
    /// Entries are keyed by the id parsed from their URL, or their name.
    #[instrument(skip(self))]
    pub async fn list_localized(&self, limit: u32, offset: u32) -> Result<LocalizedPage> {
        let page = self.source.pokemon_list(limit, offset).await?;

        let entries = join_all(page.results.iter().map(|resource| async move {
            let id = resource.pokemon_id();
            let key = match id {
                Some(id) => ResourceId::Id(id),
                None => ResourceId::Name(resource.name.clone()),
            };
            LocalizedEntry {
                id,
                name: resource.name.clone(),
                localized_name: self.pokemon_name(key).await,
            }
        }))
        .await;

        debug!(count = entries.len(), "Localized list page");

        Ok(LocalizedPage {
            count: page.count,
            page_count: page.page_count(limit),
            limit,
            offset,
            entries,
        })
    }
}

/// A detail record with localized display fields.
#[derive(Clone, Debug)]
pub struct LocalizedPokemon {
    /// Localized name
    pub localized_name: String,
    /// Category ("ねずみポケモン"), if the species record was available
    pub genus: Option<String>,
    /// First Pokédex entry in the best available language
    pub flavor_text: Option<String>,
    /// `(slug, localized)` per type, in slot order
    pub types: Vec<(String, String)>,
    /// Base stats with localized labels
    pub stats: Vec<LocalizedStat>,
    /// The underlying record
    pub detail: PokemonDetail,
}

/// A base stat with its localized label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedStat {
    /// Stat slug
    pub name: String,
    /// Localized label
    pub label: String,
    /// Base value
    pub base_stat: u32,
}

/// A list entry with its localized name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedEntry {
    /// Id parsed from the entry URL
    pub id: Option<u32>,
    /// English slug
    pub name: String,
    /// Localized name
    pub localized_name: String,
}

/// One localized page of the Pokémon list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedPage {
    /// Total number of Pokémon
    pub count: u32,
    /// Number of pages of this size
    pub page_count: u32,
    /// Page size
    pub limit: u32,
    /// Offset of the first entry
    pub offset: u32,
    /// Entries on this page
    pub entries: Vec<LocalizedEntry>,
}

impl LocalizedPage {
    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use pokedex_cache::ResolutionSource;
    use pokedex_core::constants::{DEFAULT_TTL_SECONDS, FALLBACK_TTL_SECONDS};
    use pokedex_core::types::{
        FlavorText, Genus, LocalizedName, NameRef, NamedApiResource, PokemonAbility,
        PokemonListResponse, PokemonStat, PokemonTypeSlot,
    };
    use test_case::test_case;

    use super::*;

    /// In-memory source counting every request.
    #[derive(Default)]
    struct FixtureSource {
        list: PokemonListResponse,
        details: HashMap<String, PokemonDetail>,
        species: HashMap<String, PokemonSpecies>,
        types: HashMap<String, TypeDetail>,
        species_calls: AtomicUsize,
        type_calls: AtomicUsize,
    }

    fn not_found(path: String) -> PokedexError {
        PokedexError::HttpStatus { path, status: 404 }
    }

    #[async_trait]
    impl ResourceSource for FixtureSource {
        async fn pokemon_list(&self, _limit: u32, _offset: u32) -> Result<PokemonListResponse> {
            Ok(self.list.clone())
        }

        async fn pokemon_detail(&self, id: &ResourceId) -> Result<PokemonDetail> {
            self.details
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| not_found(format!("/pokemon/{}", id)))
        }

        async fn pokemon_species(&self, id: &ResourceId) -> Result<PokemonSpecies> {
            self.species_calls.fetch_add(1, Ordering::SeqCst);
            self.species
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| not_found(format!("/pokemon-species/{}", id)))
        }

        async fn type_detail(&self, id: &ResourceId) -> Result<TypeDetail> {
            self.type_calls.fetch_add(1, Ordering::SeqCst);
            self.types
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| not_found(format!("/type/{}", id)))
        }
    }

    fn species(names: &[(&str, &str)]) -> PokemonSpecies {
        PokemonSpecies {
            names: names.iter().map(|(l, n)| LocalizedName::new(*l, *n)).collect(),
            ..Default::default()
        }
    }

    fn type_detail(name: &str, names: &[(&str, &str)]) -> TypeDetail {
        TypeDetail {
            id: 0,
            name: name.into(),
            names: names.iter().map(|(l, n)| LocalizedName::new(*l, *n)).collect(),
        }
    }

    fn fixture() -> FixtureSource {
        let mut source = FixtureSource::default();
        let mut pikachu = species(&[("en", "Pikachu"), ("ja", "ピカチュウ")]);
        pikachu.genera = vec![
            Genus { language: NameRef { name: "en".into() }, genus: "Mouse Pokémon".into() },
            Genus { language: NameRef { name: "ja-Hrkt".into() }, genus: "ねずみポケモン".into() },
        ];
        pikachu.flavor_text_entries = vec![
            FlavorText {
                language: NameRef { name: "en".into() },
                flavor_text: "When several of\nthese POKéMON gather".into(),
            },
            FlavorText {
                language: NameRef { name: "ja".into() },
                flavor_text: "ほっぺたの りょうがわに\nちいさい でんきぶくろを もつ。".into(),
            },
        ];
        source.species.insert("pikachu".into(), pikachu.clone());
        source.species.insert("25".into(), pikachu);
        source.species.insert("26".into(), species(&[("en", "Raichu"), ("ja", "ライチュウ")]));
        source.types.insert("electric".into(), type_detail("electric", &[("ja", "でんき"), ("en", "Electric")]));
        source.types.insert("fairy".into(), type_detail("fairy", &[("en", "Fairy")]));
        source.details.insert(
            "25".into(),
            PokemonDetail {
                id: 25,
                name: "pikachu".into(),
                height: 4,
                weight: 60,
                stats: vec![
                    PokemonStat { base_stat: 35, stat: NameRef { name: "hp".into() } },
                    PokemonStat { base_stat: 50, stat: NameRef { name: "special-attack".into() } },
                ],
                types: vec![
                    PokemonTypeSlot { slot: 2, kind: NameRef { name: "fairy".into() } },
                    PokemonTypeSlot { slot: 1, kind: NameRef { name: "electric".into() } },
                ],
                abilities: vec![
                    PokemonAbility { is_hidden: false, ability: NameRef { name: "static".into() } },
                    PokemonAbility { is_hidden: true, ability: NameRef { name: "lightning-rod".into() } },
                ],
                ..Default::default()
            },
        );
        // Detail without a species record
        source.details.insert(
            "132".into(),
            PokemonDetail { id: 132, name: "ditto".into(), ..Default::default() },
        );
        source.list = PokemonListResponse {
            count: 1302,
            next: None,
            previous: None,
            results: vec![
                NamedApiResource { name: "pikachu".into(), url: "https://pokeapi.co/api/v2/pokemon/25/".into() },
                NamedApiResource { name: "raichu".into(), url: "https://pokeapi.co/api/v2/pokemon/26/".into() },
            ],
        };
        source
    }

    fn localizer() -> Localizer<FixtureSource> {
        Localizer::new(fixture(), Arc::new(LocalizationCache::new()))
    }

    #[tokio::test]
    async fn test_pokemon_name_resolves_and_caches() {
        let localizer = localizer();

        let first = localizer.pokemon_name_detailed("pikachu").await;
        let second = localizer.pokemon_name_detailed("pikachu").await;

        assert_eq!(first.value, "ピカチュウ");
        assert_eq!(first.ttl, Some(Duration::from_secs(DEFAULT_TTL_SECONDS)));
        assert!(second.from_cache());
        assert_eq!(localizer.source().species_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_falls_back_with_short_ttl() {
        let localizer = localizer();

        let first = localizer.type_name_detailed("unknown-type").await;
        let second = localizer.type_name("unknown-type").await;

        assert_eq!(first.value, "unknown-type（取得中）");
        assert_eq!(first.source, ResolutionSource::FetchFailed);
        assert_eq!(first.ttl, Some(Duration::from_secs(FALLBACK_TTL_SECONDS)));
        assert_eq!(second, "unknown-type（取得中）");
        assert_eq!(localizer.source().type_calls.load(Ordering::SeqCst), 1);
    }

    #[test_case("electric", "でんき" ; "live record")]
    #[test_case("fairy", "フェアリー" ; "record without ja uses static table")]
    #[test_case("fire", "ほのお" ; "fetch failure uses static table")]
    #[test_case("shadow", "shadow（取得中）" ; "no table entry uses raw identifier")]
    #[tokio::test]
    async fn test_type_name_resolution_order(type_name: &str, expected: &str) {
        assert_eq!(localizer().type_name(type_name).await, expected);
    }

    #[tokio::test]
    async fn test_type_and_pokemon_keys_do_not_collide() {
        let localizer = localizer();
        localizer.cache().set("electric", "not a type");

        assert_eq!(localizer.type_name("electric").await, "でんき");
        assert_eq!(localizer.cache().get("electric").as_deref(), Some("not a type"));
    }

    #[tokio::test]
    async fn test_pokemon_name_numeric_and_string_share_entry() {
        let localizer = localizer();

        assert_eq!(localizer.pokemon_name(25u32).await, "ピカチュウ");
        assert!(localizer.pokemon_name_detailed("25").await.from_cache());
        assert_eq!(localizer.source().species_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_locale_has_no_static_table() {
        let localizer = localizer().with_locale("en");

        assert_eq!(localizer.pokemon_name("pikachu").await, "Pikachu");
        assert_eq!(localizer.type_name("fire").await, "fire（取得中）");
        assert_eq!(localizer.stat_label("attack"), "attack");
    }

    #[tokio::test]
    async fn test_locale_round_trip_restores_static_tables() {
        let localizer = localizer().with_locale("en").with_locale("ja");

        assert_eq!(localizer.type_name("fire").await, "ほのお");
        assert_eq!(localizer.stat_label("speed"), "すばやさ");
    }

    #[tokio::test]
    async fn test_invalid_type_name_is_not_fetched() {
        let localizer = localizer();

        let resolution = localizer.type_name_detailed("fire/../pokemon/25").await;

        assert_eq!(resolution.value, "fire/../pokemon/25（取得中）");
        assert_eq!(resolution.source, ResolutionSource::FetchFailed);
        assert_eq!(localizer.source().type_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_suffix_yields_raw_identifier() {
        let localizer = localizer().with_pending_suffix("");
        assert_eq!(localizer.pokemon_name("missingno").await, "missingno");
    }

    #[tokio::test]
    async fn test_type_names_keep_order() {
        let localizer = localizer();

        let names = localizer.type_names(&["fairy", "electric"]).await;

        assert_eq!(
            names,
            vec![
                ("fairy".to_string(), "フェアリー".to_string()),
                ("electric".to_string(), "でんき".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pokemon_detail_localized() {
        let localizer = localizer();

        let pokemon = localizer.pokemon_detail_localized(25u32).await.unwrap();

        assert_eq!(pokemon.localized_name, "ピカチュウ");
        assert_eq!(pokemon.types[0], ("electric".to_string(), "でんき".to_string()));
        assert_eq!(pokemon.types[1].1, "フェアリー");
        assert_eq!(pokemon.stats[1].label, "とくこう");
        assert_eq!(pokemon.stats[1].base_stat, 50);
        assert_eq!(pokemon.detail.weight, 60);
        assert_eq!(pokemon.genus.as_deref(), Some("ねずみポケモン"));
        assert_eq!(
            pokemon.flavor_text.as_deref(),
            Some("ほっぺたの りょうがわに ちいさい でんきぶくろを もつ。")
        );
        assert!(pokemon.detail.abilities[1].is_hidden);
    }

    #[tokio::test]
    async fn test_pokemon_detail_text_falls_back_to_english() {
        let pokemon = localizer().with_locale("en").pokemon_detail_localized(25u32).await.unwrap();

        assert_eq!(pokemon.localized_name, "Pikachu");
        assert_eq!(pokemon.genus.as_deref(), Some("Mouse Pokémon"));
        assert_eq!(pokemon.flavor_text.as_deref(), Some("When several of these POKéMON gather"));
    }

    #[tokio::test]
    async fn test_pokemon_detail_caches_name_from_species() {
        let localizer = localizer();

        localizer.pokemon_detail_localized(25u32).await.unwrap();

        assert!(localizer.pokemon_name_detailed(25u32).await.from_cache());
        assert_eq!(localizer.source().species_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pokemon_detail_without_species() {
        let localizer = localizer();

        let pokemon = localizer.pokemon_detail_localized(132u32).await.unwrap();

        assert_eq!(pokemon.localized_name, "132（取得中）");
        assert_eq!(pokemon.genus, None);
        assert_eq!(pokemon.flavor_text, None);
        assert_eq!(pokemon.detail.name, "ditto");
    }

    #[tokio::test]
    async fn test_pokemon_detail_failure_propagates() {
        let err = localizer().pokemon_detail_localized("missingno").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_list_localized_keys_by_id() {
        let localizer = localizer();

        let page = localizer.list_localized(24, 0).await.unwrap();

        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].localized_name, "ピカチュウ");
        assert_eq!(page.entries[1].id, Some(26));
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_count, 55);

        // Populated under the numeric key
        assert!(localizer.pokemon_name_detailed(25u32).await.from_cache());
    }

    #[tokio::test]
    async fn test_shared_cache_between_localizers() {
        let cache = Arc::new(LocalizationCache::new());
        let first = Localizer::new(fixture(), cache.clone());
        let second = Localizer::new(fixture(), cache.clone());

        first.pokemon_name("pikachu").await;
        second.pokemon_name("pikachu").await;

        assert_eq!(second.source().species_calls.load(Ordering::SeqCst), 0);
        first.clear_cache();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_config_apply_env() {
        let vars: HashMap<&str, &str> = [
            ("POKEAPI_BASE_URL", "http://localhost:8080/api/v2"),
            ("POKEDEX_LOCALE", "en"),
            ("POKEDEX_CACHE_TTL_SECS", "60"),
        ]
        .into_iter()
        .collect();

        let config = LocalizerConfig::default()
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.client.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.locale, "en");
        assert_eq!(config.cache.default_ttl_seconds, 60);
        assert_eq!(config.cache.fallback_ttl_seconds, FALLBACK_TTL_SECONDS);
    }

    #[test]
    fn test_config_apply_env_rejects_bad_ttl() {
        let result = LocalizerConfig::default()
            .apply_env(|k| (k == "POKEDEX_FALLBACK_TTL_SECS").then(|| "soon".to_string()));
        assert!(matches!(result, Err(PokedexError::ConfigError(_))));
    }

    #[test]
    fn test_with_config_outside_runtime_skips_cleanup() {
        let localizer = Localizer::with_config(LocalizerConfig::default()).unwrap();
        assert!(localizer._cleanup.is_none());
        assert_eq!(localizer.locale(), "ja");
    }

    #[test]
    fn test_with_config_rejects_invalid_base_url() {
        let result = Localizer::with_config(LocalizerConfig::default().with_base_url("nope"));
        assert!(matches!(result, Err(PokedexError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_live_client_end_to_end() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon-species/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "names": [{"language": {"name": "ja"}, "name": "ピカチュウ"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/type/unknown-type"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let localizer = Localizer::with_config(LocalizerConfig::default().with_base_url(server.uri())).unwrap();

        assert_eq!(localizer.pokemon_name("pikachu").await, "ピカチュウ");
        assert_eq!(localizer.pokemon_name("pikachu").await, "ピカチュウ");
        assert_eq!(localizer.type_name("unknown-type").await, "unknown-type（取得中）");
        assert_eq!(localizer.type_name("unknown-type").await, "unknown-type（取得中）");
        assert!(localizer._cleanup.is_some());
    }
}
