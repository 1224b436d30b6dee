//! Domain types for Pokedex.
//!
//! - [`ResourceId`]: Numeric id or name addressing a PokeAPI record
//! - [`CacheKey`]: String-coerced key of the localization cache
//! - [`PokemonDetail`], [`PokemonSpecies`], [`TypeDetail`]: Read-only API records
//! - [`PokemonListResponse`]: One page of the Pokémon list

mod key;
mod resource;

pub use key::*;
pub use resource::*;
