//! # Pokedex i18n
//!
//! Japanese display names for Pokémon and types.
//! Resolution order: cache, live PokeAPI record, static table, raw identifier.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod resolver;
mod tables;

pub use pokedex_cache::{CacheConfig, LocalizationCache, Resolution, ResolutionSource};
pub use pokedex_client::{ClientConfig, PokeApiClient};
pub use resolver::{LocalizedEntry, LocalizedPage, LocalizedPokemon, LocalizedStat, Localizer, LocalizerConfig};
pub use tables::{format_pokemon_id, FallbackTable};
