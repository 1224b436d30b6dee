//! Constants for the Pokedex stack.
//!
//! API paths follow PokeAPI v2. TTLs are expressed in seconds so they can be
//! carried in serde configs without a duration codec.

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI
// ═══════════════════════════════════════════════════════════════════════════════

/// Root of the public PokeAPI v2 REST service.
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Path of the paginated Pokémon list.
pub const POKEMON_PATH: &str = "/pokemon";

/// Path prefix of species records.
pub const POKEMON_SPECIES_PATH: &str = "/pokemon-species";

/// Path prefix of type records.
pub const TYPE_PATH: &str = "/type";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent with every PokeAPI request.
pub const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// LOCALIZATION CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// TTL of a successfully resolved name (24 hours).
pub const DEFAULT_TTL_SECONDS: u64 = 24 * 60 * 60;

/// TTL of a fallback stored after a failed fetch (1 hour).
///
/// A failing key is not re-fetched until this window passes.
pub const FALLBACK_TTL_SECONDS: u64 = 60 * 60;

/// Interval of the periodic expired-entry sweep (10 minutes).
pub const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 10 * 60;

/// Cache key prefix for type names, keeping them apart from Pokémon keys.
pub const TYPE_KEY_PREFIX: &str = "type_";

// ═══════════════════════════════════════════════════════════════════════════════
// LOCALE
// ═══════════════════════════════════════════════════════════════════════════════

/// Language code selected from `names` arrays.
pub const DEFAULT_LOCALE: &str = "ja";

/// Suffix appended to an identifier shown while its localized name is unavailable.
pub const PENDING_SUFFIX: &str = "（取得中）";

// ═══════════════════════════════════════════════════════════════════════════════
// LISTING
// ═══════════════════════════════════════════════════════════════════════════════

/// Default page size of the Pokémon list.
pub const DEFAULT_PAGE_LIMIT: u32 = 24;
