//! Service configuration
//!
//! TOML file with per-field defaults; the API key always comes from the
//! environment, never from the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Provider endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model used for judgments
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Embedding model used for retrieval
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimension the index was built with
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            embedding_dimension: default_embedding_dimension(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the retrieval index artifact
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Passages retrieved per query
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,

    /// Per-judgment-branch timeout; a late branch folds to defaults
    #[serde(default)]
    pub task_timeout_secs: Option<u64>,

    /// Provider settings
    #[serde(default)]
    pub provider: ProviderSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            index_path: default_index_path(),
            retrieval_k: default_retrieval_k(),
            task_timeout_secs: None,
            provider: ProviderSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Loads the config file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> std::io::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                toml::from_str(&raw).map_err(std::io::Error::other)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reads the API key from the configured environment variable
    ///
    /// A missing key is a startup warning, not a startup failure; requests
    /// then fail with a server error until the key is provided.
    pub fn api_key(&self) -> Option<String> {
        match std::env::var(&self.provider.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Some(key),
            _ => {
                warn!(var = %self.provider.api_key_env, "API key is not set");
                None
            }
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_index_path() -> PathBuf {
    PathBuf::from("ripplecast_index.json")
}

fn default_retrieval_k() -> usize {
    ripplecast_retrieval::retriever::DEFAULT_K
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimension() -> usize {
    1536
}

fn default_api_key_env() -> String {
    "RIPPLECAST_API_KEY".to_string()
}
