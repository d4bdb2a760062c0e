use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigError, ServerConfig};

/// Serve a flat L2 vector index over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "flatvec-server", version)]
pub struct ServeArgs {
    /// JSON config file; flags below override its fields.
    #[arg(long, env = "FLATVEC_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "FLATVEC_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "FLATVEC_PORT")]
    pub port: Option<u16>,

    /// Neighbours returned when a request does not specify `k`.
    #[arg(long, env = "FLATVEC_TOP_K")]
    pub top_k: Option<usize>,

    #[arg(long, env = "FLATVEC_MAX_TOP_K")]
    pub max_top_k: Option<usize>,

    /// Largest request body accepted, in bytes.
    #[arg(long, env = "FLATVEC_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
}

impl ServeArgs {
    /// Resolve the effective configuration: file (or defaults), then overrides.
    pub fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(k) = self.top_k {
            config.default_top_k = k;
        }
        if let Some(k) = self.max_top_k {
            config.max_top_k = k;
        }
        if let Some(n) = self.max_body_bytes {
            config.max_body_bytes = n;
        }
        config.validate()?;
        Ok(config)
    }
}
