//! Request bodies and their validation.
//!
//! Bodies are read as raw JSON and checked by hand so every malformed input
//! becomes a 400 with a specific message. Shape (rectangularity, nesting) is
//! checked before any value is converted to a number.

use crate::error::ApiError;
use fv_index::{VectorBatch, VectorDbError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Parse a request body into a JSON object.
pub fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::bad_request("Request body must be a JSON object.")),
        Err(e) => Err(ApiError::bad_request(format!("Invalid JSON body: {e}"))),
    }
}

fn number(value: &Value, what: &str) -> Result<f32, ApiError> {
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| ApiError::bad_request(format!("{what} contains a non-numeric value: {value}")))
}

/// Ingest body: `{"vectors": [[f, ...], ...]}`.
pub fn ingest_batch(body: &Map<String, Value>) -> Result<VectorBatch, ApiError> {
    let vectors = body
        .get("vectors")
        .ok_or_else(|| ApiError::bad_request("Missing 'vectors' key in request body."))?;
    let invalid = |msg: String| ApiError::bad_request(format!("Invalid vectors format: {msg}"));

    let outer = vectors
        .as_array()
        .ok_or_else(|| invalid("'vectors' must be an array of arrays".into()))?;
    let mut rows = Vec::with_capacity(outer.len());
    for (i, row) in outer.iter().enumerate() {
        let row = row
            .as_array()
            .ok_or_else(|| invalid(format!("row {i} is not an array")))?;
        rows.push(row);
    }
    if let Some(first) = rows.first() {
        let expected = first.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(invalid(VectorDbError::RaggedBatch { row, expected, got: r.len() }.to_string()));
        }
    }

    let rows = rows
        .into_iter()
        .map(|row| row.iter().map(|v| number(v, "'vectors'")).collect::<Result<Vec<f32>, _>>())
        .collect::<Result<Vec<Vec<f32>>, _>>()
        .map_err(|e| invalid(e.message))?;
    VectorBatch::from_rows(&rows).map_err(|e| invalid(e.to_string()))
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: Vec<f32>,
    pub top_k: Option<usize>,
}

/// Search body: `{"query_vector": [f, ...], "k": optional positive integer}`.
pub fn search_request(body: &Map<String, Value>) -> Result<SearchRequest, ApiError> {
    let raw = body
        .get("query_vector")
        .ok_or_else(|| ApiError::bad_request("Missing 'query_vector' key in request body."))?;
    let invalid = |msg: &str| ApiError::bad_request(format!("Invalid query vector format: {msg}"));

    let items = raw.as_array().ok_or_else(|| invalid("Query vector must be a 1D array."))?;
    if items.iter().any(Value::is_array) {
        return Err(invalid("Query vector must be a 1D array."));
    }
    let query = items
        .iter()
        .map(|v| number(v, "'query_vector'"))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| invalid(&e.message))?;

    let top_k = match body.get("k") {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_u64() {
            Some(k) if k > 0 => Some(usize::try_from(k).map_err(|_| ApiError::bad_request("'k' is too large."))?),
            _ => return Err(ApiError::bad_request(format!("'k' must be a positive integer, got {v}"))),
        },
    };
    Ok(SearchRequest { query, top_k })
}

/// Successful ingest response.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub added: usize,
    pub current_index_size: usize,
    pub dimension: usize,
}

/// Successful search response. Padded slots carry `null` distance and `-1` index.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub distances: Vec<Option<f64>>,
    pub indices: Vec<i64>,
    pub k: usize,
    pub found: usize,
}

impl From<fv_index::SearchResult> for SearchResponse {
    fn from(r: fv_index::SearchResult) -> Self {
        let distances = r
            .distances
            .iter()
            .zip(r.indices.iter())
            .map(|(&d, &i)| (!fv_index::distance::is_sentinel(d, i)).then_some(d))
            .collect();
        Self { k: r.len(), found: r.found, distances, indices: r.indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_object_rejects_non_objects() {
        assert!(parse_object(b"[1, 2]").is_err());
        assert!(parse_object(b"{not json").is_err());
        assert!(parse_object(br#"{"vectors": []}"#).is_ok());
    }

    #[test]
    fn test_ingest_missing_key() {
        let err = ingest_batch(&obj(json!({"vecs": [[1.0]]}))).unwrap_err();
        assert_eq!(err.message, "Missing 'vectors' key in request body.");
    }

    #[test]
    fn test_ingest_ragged_checked_before_numbers() {
        let err = ingest_batch(&obj(json!({"vectors": [[1, "x"], [1]]}))).unwrap_err();
        assert!(err.message.contains("Ragged batch"), "{}", err.message);
    }

    #[test]
    fn test_ingest_non_numeric() {
        let err = ingest_batch(&obj(json!({"vectors": [[1, true]]}))).unwrap_err();
        assert!(err.message.contains("non-numeric"), "{}", err.message);
    }

    #[test]
    fn test_ingest_flat_list_is_rejected() {
        assert!(ingest_batch(&obj(json!({"vectors": [1, 2, 3]}))).is_err());
    }

    #[test]
    fn test_ingest_valid() {
        let batch = ingest_batch(&obj(json!({"vectors": [[1, 0], [0.5, 1]]}))).unwrap();
        assert_eq!(batch.rows(), 2);
        assert_eq!(batch.dimension(), 2);
    }

    #[test]
    fn test_search_nested_query_rejected() {
        let err = search_request(&obj(json!({"query_vector": [[0, 0]]}))).unwrap_err();
        assert!(err.message.contains("1D array"));
        assert!(search_request(&obj(json!({"query_vector": 3}))).is_err());
    }

    #[test]
    fn test_search_k_parsing() {
        let req = search_request(&obj(json!({"query_vector": [0, 1], "k": 3}))).unwrap();
        assert_eq!(req.top_k, Some(3));
        assert_eq!(req.query, vec![0.0, 1.0]);
        assert!(search_request(&obj(json!({"query_vector": [0], "k": 0}))).is_err());
        assert!(search_request(&obj(json!({"query_vector": [0], "k": -2}))).is_err());
        assert!(search_request(&obj(json!({"query_vector": [0], "k": 1.5}))).is_err());
    }
}
