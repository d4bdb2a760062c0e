//! flatvec HTTP API server (Axum).
//!
//! Provides REST endpoints to ingest vectors into a shared flat index,
//! search it for nearest neighbours, and inspect index and process health.

pub mod cli;
pub mod config;
pub mod error;
pub mod request;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use cli::ServeArgs;
pub use config::ServerConfig;

/// Build the application router with all routes.
pub fn app() -> Router {
    let state = AppState::new();
    app_with_state(state)
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.limits.max_body_bytes);
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::vector_routes())
        .with_state(state)
        .layer(body_limit)
}

/// Install the global tracing subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolve config, bind, and serve until Ctrl-C.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    let state = AppState::from_config(&config);
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        default_top_k = config.default_top_k,
        max_body_bytes = config.max_body_bytes,
        "flatvec server listening"
    );

    axum::serve(listener, app_with_state(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal, index contents will be discarded");
        })
        .await?;
    Ok(())
}
