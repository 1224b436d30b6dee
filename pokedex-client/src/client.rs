//! PokeAPI client implementation.
//!
//! Issues GET requests against a fixed base endpoint. Non-success statuses,
//! transport failures and undecodable bodies are logged and returned; nothing
//! is retried.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, Span};
use url::Url;

use pokedex_core::constants::{
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, POKEAPI_BASE_URL, POKEMON_PATH,
    POKEMON_SPECIES_PATH, TYPE_PATH,
};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResourceSource;
use pokedex_core::types::{
    PokemonDetail, PokemonListResponse, PokemonSpecies, ResourceId, TypeDetail,
};

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. "https://pokeapi.co/api/v2"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| PokedexError::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(PokedexError::ConfigError(format!(
                "base URL must be http or https: {}",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(PokedexError::ConfigError("timeout must be positive".into()));
        }

        Ok(())
    }
}

/// Read-only PokeAPI client.
pub struct PokeApiClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches one page of the Pokémon list (`/pokemon?limit=N&offset=M`).
    #[instrument(skip(self))]
    pub async fn get_pokemon_list(&self, limit: u32, offset: u32) -> Result<PokemonListResponse> {
        self.fetch_json(&format!("{}?limit={}&offset={}", POKEMON_PATH, limit, offset))
            .await
    }

    /// Fetches a Pokémon detail record (`/pokemon/{idOrName}`).
    #[instrument(skip(self, id), fields(id))]
    pub async fn get_pokemon_detail(&self, id: impl Into<ResourceId>) -> Result<PokemonDetail> {
        let id = id.into();
        Span::current().record("id", tracing::field::display(&id));
        self.fetch_json(&format!("{}/{}", POKEMON_PATH, id)).await
    }

    /// Fetches a species record (`/pokemon-species/{idOrName}`).
    #[instrument(skip(self, id), fields(id))]
    pub async fn get_pokemon_species(&self, id: impl Into<ResourceId>) -> Result<PokemonSpecies> {
        let id = id.into();
        Span::current().record("id", tracing::field::display(&id));
        self.fetch_json(&format!("{}/{}", POKEMON_SPECIES_PATH, id)).await
    }

    /// Fetches a type record (`/type/{idOrName}`).
    #[instrument(skip(self, id), fields(id))]
    pub async fn get_type_detail(&self, id: impl Into<ResourceId>) -> Result<TypeDetail> {
        let id = id.into();
        Span::current().record("id", tracing::field::display(&id));
        self.fetch_json(&format!("{}/{}", TYPE_PATH, id)).await
    }

    /// GETs `path` below the base URL and decodes the JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            error!(path, error = %e, "PokeAPI fetch error");
            PokedexError::HttpError {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(path, status = status.as_u16(), "PokeAPI request failed");
            return Err(PokedexError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!(path, error = %e, "PokeAPI body read error");
            PokedexError::HttpError {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        let record = serde_json::from_slice(&body).map_err(|e| {
            error!(path, error = %e, "PokeAPI response decode error");
            PokedexError::DecodeError {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(path, bytes = body.len(), "Fetched PokeAPI record");
        Ok(record)
    }
}

#[async_trait]
impl ResourceSource for PokeApiClient {
    async fn pokemon_list(&self, limit: u32, offset: u32) -> Result<PokemonListResponse> {
        self.get_pokemon_list(limit, offset).await
    }

    async fn pokemon_detail(&self, id: &ResourceId) -> Result<PokemonDetail> {
        self.get_pokemon_detail(id).await
    }

    async fn pokemon_species(&self, id: &ResourceId) -> Result<PokemonSpecies> {
        self.get_pokemon_species(id).await
    }

    async fn type_detail(&self, id: &ResourceId) -> Result<TypeDetail> {
        self.get_type_detail(id).await
    }
}
