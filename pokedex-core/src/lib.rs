//! # Pokedex Core
//!
//! Core types, errors, and traits shared by the Pokedex crates.
//!
//! This crate provides the foundational building blocks used by all other Pokedex crates:
//!
//! - **Types**: PokeAPI resource records, resource identifiers and cache keys
//! - **Errors**: Error hierarchy with fetch-error classification
//! - **Constants**: API root, TTLs and locale defaults
//! - **Traits**: The [`ResourceSource`] seam between consumers and the HTTP client
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{CacheKey, ResourceId};
//!
//! // Numeric ids and their string form address the same cache entry
//! assert_eq!(CacheKey::from(25u32), CacheKey::from("25"));
//! assert_eq!(ResourceId::from("pikachu").to_string(), "pikachu");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
