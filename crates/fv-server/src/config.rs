//! Server configuration.
//!
//! Loaded from an optional JSON file; CLI flags and `FLATVEC_*` environment
//! variables override individual fields (see [`crate::cli::ServeArgs`]).

use fv_index::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// 64 MiB: room for ingest batches of a few hundred thousand floats.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Neighbours returned when a search request carries no `k`.
    pub default_top_k: usize,
    /// Upper bound accepted for a per-request `k`.
    pub max_top_k: usize,
    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            default_top_k: DEFAULT_TOP_K,
            max_top_k: 1024,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".into()));
        }
        if self.default_top_k == 0 {
            return Err(ConfigError::Invalid("default_top_k must be at least 1".into()));
        }
        if self.max_top_k < self.default_top_k {
            return Err(ConfigError::Invalid(format!(
                "max_top_k ({}) must be >= default_top_k ({})",
                self.max_top_k, self.default_top_k
            )));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be non-zero".into()));
        }
        Ok(())
    }

    /// Address in `host:port` form; `host` may be a name to resolve.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
