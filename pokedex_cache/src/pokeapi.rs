//! PokéAPI client
//!
//! Uses async reqwest for non-blocking HTTP requests. The base URL is
//! injectable so tests can point the client at a mock server.

use pokedex_common::{ApiMove, ApiPokemon, PokedexError, PokemonRecord, Result};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::retry::RetryConfig;

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    retry: RetryConfig,
}

impl PokeApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            retry: config.retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/pokemon/{id}`
    pub fn pokemon_url(&self, id: u32) -> String {
        format!("{}/pokemon/{}", self.base_url, id)
    }

    /// `{base}/move/{name}`
    pub fn move_url(&self, name: &str) -> String {
        format!("{}/move/{}", self.base_url, urlencoding::encode(name))
    }

    /// Fetch and convert a pokémon record, retrying on rate limiting
    pub async fn fetch_pokemon(&self, id: u32) -> Result<PokemonRecord> {
        if id == 0 {
            return Err(PokedexError::InvalidId(id));
        }

        let url = self.pokemon_url(id);
        log::info!("Fetching pokémon {} from {}", id, url);

        let pokemon: ApiPokemon = self
            .retry
            .retry(&format!("pokemon {id}"), || self.get_json(&url))
            .await?;

        Ok(pokemon.into_record(id))
    }

    /// Fetch a move from its lookup URL, retrying on rate limiting
    pub async fn fetch_move(&self, url: &str) -> Result<ApiMove> {
        log::info!("Fetching move from {}", url);

        self.retry
            .retry(&format!("move {url}"), || self.get_json(url))
            .await
    }

    /// Single GET attempt. Non-2xx statuses (429 included) become
    /// [`PokedexError::HttpStatus`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {} returned {}", url, status);
            return Err(PokedexError::HttpStatus(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[path = "pokeapi_tests.rs"]
mod tests;
