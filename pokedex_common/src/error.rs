//! Error types shared by the Pokédex crates

use thiserror::Error;

/// Unified error type for fetch and cache operations
#[derive(Debug, Error)]
pub enum PokedexError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Response body or persisted entry could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Still rate limited after every allowed attempt
    #[error("Rate limited by the API after {attempts} attempt(s)")]
    RateLimited { attempts: usize },
    /// Local store I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Pokédex ids start at 1
    #[error("Invalid pokémon id: {0}")]
    InvalidId(u32),
    /// Move lookup was requested without an endpoint
    #[error("No lookup URL given for move: {0}")]
    MissingLookupUrl(String),
}

impl PokedexError {
    /// Whether a retry may succeed. Only HTTP 429 responses qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PokedexError::HttpStatus(status) if *status == reqwest::StatusCode::TOO_MANY_REQUESTS)
    }
}

/// Result alias for Pokédex operations
pub type Result<T> = std::result::Result<T, PokedexError>;
