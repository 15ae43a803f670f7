//! Runtime configuration
//!
//! Every field has a default, so an empty JSON object (or no config file at
//! all) gives a working setup against the public PokéAPI.

use pokedex_common::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Version group whose flavor text is shown for moves
pub const DEFAULT_VERSION_GROUP: &str = "firered-leafgreen";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_version_group")]
    pub target_version_group: String,
    /// Age after which a cached entry is fetched again. Unset means never.
    #[serde(default)]
    pub entry_ttl_secs: Option<u64>,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            target_version_group: default_version_group(),
            entry_ttl_secs: None,
            retry: RetryConfig::default(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Returns the default cache directory: ~/.cache/pokedex
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pokedex")
}

fn default_user_agent() -> String {
    format!("pokedex-cache/{}", env!("CARGO_PKG_VERSION"))
}

fn default_version_group() -> String {
    DEFAULT_VERSION_GROUP.to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn entry_ttl(&self) -> Option<Duration> {
        self.entry_ttl_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_pokeapi() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.target_version_group, "firered-leafgreen");
        assert_eq!(config.entry_ttl(), None);
        assert!(config.cache_dir.ends_with("pokedex"));
        assert!(config.user_agent.starts_with("pokedex-cache/"));
    }

    #[test]
    fn empty_object_equals_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "api_base_url": "http://localhost:8080",
                "entry_ttl_secs": 3600,
                "retry": {{ "max_attempts": 5 }}
            }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.entry_ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert_eq!(config.target_version_group, "firered-leafgreen");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("missing.json")).is_err());
    }
}
