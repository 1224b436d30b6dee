//! Identifier and cache key types.
//!
//! A [`ResourceId`] is what the API is asked for; a [`CacheKey`] is what the
//! localization cache stores under. Keys compare by their string form only, so
//! `25` and `"25"` address the same entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::TYPE_KEY_PREFIX;
use crate::error::PokedexError;

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Numeric id or name of a PokeAPI record.
///
/// Displays as the bare id or name, which is also the request path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// National dex number or type id
    Id(u32),
    /// Slug such as `pikachu` or `electric`
    Name(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Id(id) => write!(f, "{}", id),
            ResourceId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Id(id)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(id) => ResourceId::Id(id),
            Err(_) => ResourceId::Name(s.to_string()),
        }
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        match s.parse::<u32>() {
            Ok(id) => ResourceId::Id(id),
            Err(_) => ResourceId::Name(s),
        }
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

impl FromStr for ResourceId {
    type Err = PokedexError;

    /// Parses user input, rejecting blanks and path separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PokedexError::ValidationError("identifier cannot be empty".into()));
        }
        if s.contains(['/', '?', '#']) {
            return Err(PokedexError::ValidationError(format!(
                "identifier contains a reserved character: {}",
                s
            )));
        }
        Ok(ResourceId::from(s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Key of the localization cache.
///
/// Two keys are equal iff their string coercions are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of a type name, prefixed so it never collides with a Pokémon key.
    pub fn for_type(type_name: impl fmt::Display) -> Self {
        CacheKey(format!("{}{}", TYPE_KEY_PREFIX, type_name))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for CacheKey {
    fn from(id: u32) -> Self {
        CacheKey(id.to_string())
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        CacheKey(s.to_string())
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        CacheKey(s)
    }
}

impl From<&ResourceId> for CacheKey {
    fn from(id: &ResourceId) -> Self {
        CacheKey(id.to_string())
    }
}

impl From<ResourceId> for CacheKey {
    fn from(id: ResourceId) -> Self {
        CacheKey::from(&id)
    }
}

impl From<&CacheKey> for CacheKey {
    fn from(key: &CacheKey) -> Self {
        key.clone()
    }
}
