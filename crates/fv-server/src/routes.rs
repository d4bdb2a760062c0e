use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use fv_index::IndexStats;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::request::{self, IngestResponse, SearchResponse};
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn vector_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/vectors", post(ingest_vectors))
        .route("/api/v1/vectors/{position}", get(get_vector))
        .route("/api/v1/search", post(search_vectors))
        .route("/api/v1/index", get(index_stats))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "index_size": state.index.len(),
    }))
}

async fn ingest_vectors(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let body = request::parse_object(&body?)?;
    let batch = request::ingest_batch(&body)?;
    let added = batch.rows();
    let dimension = batch.dimension();

    let total = state.index.add(batch)?;
    info!(added, total, dimension, "vectors ingested");
    Ok(Json(IngestResponse {
        message: format!("Successfully added {added} vectors to the index."),
        added,
        current_index_size: total,
        dimension,
    }))
}

async fn search_vectors(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let body = request::parse_object(&body?)?;
    let req = request::search_request(&body)?;
    let top_k = req.top_k.unwrap_or(state.limits.default_top_k);
    if top_k > state.limits.max_top_k {
        return Err(ApiError::bad_request(format!(
            "'k' must be at most {}, got {top_k}",
            state.limits.max_top_k
        )));
    }

    let result = state.index.search(&req.query, top_k)?;
    debug!(top_k, found = result.found, "search served");
    Ok(Json(SearchResponse::from(result)))
}

async fn get_vector(
    State(state): State<AppState>,
    position: Result<Path<usize>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(position) = position?;
    let vector = state
        .index
        .get(position)
        .ok_or_else(|| ApiError::not_found(format!("No vector at position {position}")))?;
    Ok(Json(json!({ "position": position, "vector": vector })))
}

async fn index_stats(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.index.stats())
}
