//! Error types for Pokedex.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Network failures carry the request path so they can be logged and
//! classified without re-parsing the message.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The API answered with a non-success status.
    #[error("PokeAPI error: {status} ({path})")]
    HttpStatus { path: String, status: u16 },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("PokeAPI request failed for {path}: {reason}")]
    HttpError { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The response body did not match the expected record schema.
    #[error("PokeAPI response for {path} could not be decoded: {reason}")]
    DecodeError { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PokedexError {
    /// Returns true if this error came from talking to the API.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            PokedexError::HttpStatus { .. }
                | PokedexError::HttpError { .. }
                | PokedexError::DecodeError { .. }
        )
    }

    /// Returns true if a later attempt could succeed.
    ///
    /// Transport failures and 5xx/429 responses qualify; other 4xx do not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::HttpError { .. } => true,
            PokedexError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Request path for fetch errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            PokedexError::HttpStatus { path, .. }
            | PokedexError::HttpError { path, .. }
            | PokedexError::DecodeError { path, .. } => Some(path),
            _ => None,
        }
    }

    /// HTTP status for non-success responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            PokedexError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
