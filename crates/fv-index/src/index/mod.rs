//! Vector index implementations.

mod flat;
mod traits;

pub use flat::FlatIndex;
pub use traits::VectorIndex;

use crate::distance::{SENTINEL_DISTANCE, SENTINEL_INDEX};
use serde::Serialize;

/// Default number of neighbours returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Lifecycle of an index. There is no transition back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    /// No dimension fixed, nothing stored.
    Uninitialized,
    /// Dimension fixed; the store can grow.
    Ready,
}

/// Point-in-time description of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub state: IndexState,
    pub dimension: Option<usize>,
    pub size: usize,
}

/// Search result: parallel (distance, position) arrays, ascending by distance.
///
/// Always `k` long. When the store holds fewer than `k` vectors the tail is
/// padded with sentinel slots (`f64::INFINITY`, `-1`); `found` counts the
/// real ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub distances: Vec<f64>,
    pub indices: Vec<i64>,
    pub found: usize,
}

impl SearchResult {
    /// Build a `k`-slot result from real hits, padding the remainder.
    pub(crate) fn padded(hits: Vec<(f64, usize)>, k: usize) -> Self {
        let found = hits.len().min(k);
        let mut distances = Vec::with_capacity(k);
        let mut indices = Vec::with_capacity(k);
        for (dist, pos) in hits.into_iter().take(k) {
            distances.push(dist);
            indices.push(pos as i64);
        }
        distances.resize(k, SENTINEL_DISTANCE);
        indices.resize(k, SENTINEL_INDEX);
        Self { distances, indices, found }
    }

    /// Number of slots, including padding.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// True when some slots are sentinels.
    pub fn is_padded(&self) -> bool {
        self.found < self.len()
    }

    /// The real hits as (position, distance), skipping padding.
    pub fn hits(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .zip(self.distances.iter())
            .take(self.found)
            .map(|(&i, &d)| (i as usize, d))
    }
}
