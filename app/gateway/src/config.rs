//! Gateway configuration loaded from TOML.

use anyhow::Result;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// LLM provider configuration.
    pub llm: LlmConfig,
    /// Memory backend configuration.
    pub memory: MemoryConfig,
}

/// Server configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: CompactString,
    /// API key (supports `${ENV_VAR}` expansion).
    pub api_key: String,
    /// Optional base URL override for the provider endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-pro".into(),
            api_key: "${GEMINI_API_KEY}".to_owned(),
            base_url: None,
        }
    }
}

/// Memory backend configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Backend type: "in_memory" or "sqlite".
    pub backend: MemoryBackendKind,
    /// Database path for the sqlite backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Memory backend kind.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemoryBackendKind {
    /// In-memory backend (no persistence).
    #[default]
    InMemory,
    /// SQLite-backed persistent memory.
    Sqlite,
}

impl GatewayConfig {
    /// Parse a TOML string into a `GatewayConfig`, expanding `${ENV_VAR}`
    /// patterns in the raw text first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The address to bind the server to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
