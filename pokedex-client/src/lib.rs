//! PokeAPI client for list, detail, species and type records.
//!
//! Read-only; every failure surfaces as a fetch error carrying the request path.

mod client;

pub use client::{ClientConfig, PokeApiClient};
pub use pokedex_core::types::extract_id_from_resource_url;
