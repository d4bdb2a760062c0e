//! Application state shared across all handlers.

use crate::config::ServerConfig;
use fv_index::{FlatIndex, VectorIndex};
use std::sync::Arc;

/// Request limits taken from the server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub default_top_k: usize,
    pub max_top_k: usize,
    pub max_body_bytes: usize,
}

impl From<&ServerConfig> for RequestLimits {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            default_top_k: cfg.default_top_k,
            max_top_k: cfg.max_top_k,
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

/// Shared application state.
///
/// The index lives for as long as any clone of the state does; nothing is
/// persisted.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn VectorIndex>,
    pub limits: RequestLimits,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    /// Fresh, uninitialized flat index with limits from `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::with_index(Arc::new(FlatIndex::new()), config)
    }

    pub fn with_index(index: Arc<dyn VectorIndex>, config: &ServerConfig) -> Self {
        Self {
            index,
            limits: RequestLimits::from(config),
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
