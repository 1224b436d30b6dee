//! Common traits for Pokedex.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PokemonDetail, PokemonListResponse, PokemonSpecies, ResourceId, TypeDetail};

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only access to PokeAPI records.
///
/// Implementations might use:
/// - The live HTTP API (`pokedex-client`)
/// - In-memory fixtures (for testing)
///
/// Records are owned by the source; callers never mutate them.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetches one page of the Pokémon list.
    async fn pokemon_list(&self, limit: u32, offset: u32) -> Result<PokemonListResponse>;

    /// Fetches a Pokémon detail record by id or name.
    async fn pokemon_detail(&self, id: &ResourceId) -> Result<PokemonDetail>;

    /// Fetches a species record by id or name.
    async fn pokemon_species(&self, id: &ResourceId) -> Result<PokemonSpecies>;

    /// Fetches a type record by id or name.
    async fn type_detail(&self, id: &ResourceId) -> Result<TypeDetail>;
}

#[async_trait]
impl<S: ResourceSource + ?Sized> ResourceSource for std::sync::Arc<S> {
    async fn pokemon_list(&self, limit: u32, offset: u32) -> Result<PokemonListResponse> {
        (**self).pokemon_list(limit, offset).await
    }

    async fn pokemon_detail(&self, id: &ResourceId) -> Result<PokemonDetail> {
        (**self).pokemon_detail(id).await
    }

    async fn pokemon_species(&self, id: &ResourceId) -> Result<PokemonSpecies> {
        (**self).pokemon_species(id).await
    }

    async fn type_detail(&self, id: &ResourceId) -> Result<TypeDetail> {
        (**self).type_detail(id).await
    }
}
