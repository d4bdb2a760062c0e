use std::collections::BinaryHeap;
use std::sync::Arc;
use ordered_float::OrderedFloat;
use parking_lot::{Mutex, RwLock};
use tracing::debug;
use crate::batch::VectorBatch;
use crate::distance;
use crate::error::{Result, VectorDbError};
use super::{traits::VectorIndex, IndexState, IndexStats, SearchResult};

/// Brute-force (flat) L2 index.
/// Exact nearest-neighbor search by scanning all vectors.
///
/// Writers are serialized by `writer` and publish a fresh [`Snapshot`];
/// readers clone the current snapshot pointer and scan it lock-free, so a
/// search sees either all or none of a concurrent batch.
pub struct FlatIndex {
    writer: Mutex<()>,
    snapshot: RwLock<Arc<Snapshot>>,
}

#[derive(Default)]
struct Snapshot {
    dimension: Option<usize>,
    /// One segment per ingested batch, in insertion order.
    segments: Vec<Arc<Segment>>,
    len: usize,
}

struct Segment {
    /// Position of the first row.
    start: usize,
    /// Row-major data.
    data: Vec<f32>,
}

impl Snapshot {
    fn stats(&self) -> IndexStats {
        IndexStats {
            state: if self.dimension.is_some() { IndexState::Ready } else { IndexState::Uninitialized },
            dimension: self.dimension,
            size: self.len,
        }
    }

    fn row(&self, position: usize) -> Option<&[f32]> {
        let dim = self.dimension?;
        if position >= self.len {
            return None;
        }
        // segments are sorted by start; find the last one starting at or before position
        let seg_idx = self.segments.partition_point(|s| s.start <= position) - 1;
        let seg = &self.segments[seg_idx];
        let offset = (position - seg.start) * dim;
        seg.data.get(offset..offset + dim)
    }
}

impl FlatIndex {
    /// Create an uninitialized index; the first batch fixes the dimension.
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(()),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// Create an index that is already `Ready` for `dimension`.
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        let idx = Self::new();
        idx.initialize(dimension)?;
        Ok(idx)
    }

    fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    fn publish(&self, next: Snapshot) {
        *self.snapshot.write() = Arc::new(next);
    }
}

impl Default for FlatIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorIndex for FlatIndex {
    fn initialize(&self, dimension: usize) -> Result<()> {
        if dimension == 0 {
            return Err(VectorDbError::InvalidDimension(dimension));
        }
        let _guard = self.writer.lock();
        let cur = self.current();
        match cur.dimension {
            Some(d) if d == dimension => Ok(()),
            Some(d) => Err(VectorDbError::DimensionMismatch { expected: d, got: dimension }),
            None => {
                debug!(dimension, "flat index initialized");
                self.publish(Snapshot { dimension: Some(dimension), segments: Vec::new(), len: 0 });
                Ok(())
            }
        }
    }

    fn add(&self, batch: VectorBatch) -> Result<usize> {
        let _guard = self.writer.lock();
        let cur = self.current();
        let dimension = match cur.dimension {
            Some(d) if d != batch.dimension() => {
                return Err(VectorDbError::DimensionMismatch { expected: d, got: batch.dimension() });
            }
            Some(d) => d,
            None => {
                debug!(dimension = batch.dimension(), "flat index initialized from first batch");
                batch.dimension()
            }
        };

        let rows = batch.rows();
        let mut segments = Vec::with_capacity(cur.segments.len() + 1);
        segments.extend(cur.segments.iter().cloned());
        segments.push(Arc::new(Segment { start: cur.len, data: batch.into_data() }));
        let len = cur.len + rows;

        self.publish(Snapshot { dimension: Some(dimension), segments, len });
        debug!(added = rows, total = len, "flat index batch appended");
        Ok(len)
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<SearchResult> {
        if top_k == 0 {
            return Err(VectorDbError::InvalidTopK(top_k));
        }
        VectorBatch::single(query)?;
        let snap = self.current();
        let dimension = snap.dimension.ok_or(VectorDbError::Uninitialized)?;
        if query.len() != dimension {
            return Err(VectorDbError::DimensionMismatch { expected: dimension, got: query.len() });
        }

        // Max-heap holding the best k so far; the root is the worst kept hit.
        // Keys are (distance, position) so equal distances prefer earlier positions.
        let mut best: BinaryHeap<(OrderedFloat<f64>, usize)> = BinaryHeap::with_capacity(top_k + 1);
        for seg in &snap.segments {
            for (offset, vec) in seg.data.chunks_exact(dimension).enumerate() {
                let key = (OrderedFloat(distance::l2_squared(query, vec)), seg.start + offset);
                if best.len() < top_k {
                    best.push(key);
                } else if let Some(&worst) = best.peek() {
                    if key < worst {
                        best.pop();
                        best.push(key);
                    }
                }
            }
        }

        let hits: Vec<(f64, usize)> = best
            .into_sorted_vec()
            .into_iter()
            .map(|(OrderedFloat(d), pos)| (d, pos))
            .collect();
        debug!(top_k, found = hits.len(), scanned = snap.len, "flat index search");
        Ok(SearchResult::padded(hits, top_k))
    }

    fn get(&self, position: usize) -> Option<Vec<f32>> {
        self.current().row(position).map(<[f32]>::to_vec)
    }

    fn len(&self) -> usize {
        self.current().len
    }

    fn dimension(&self) -> Option<usize> {
        self.current().dimension
    }

    fn stats(&self) -> IndexStats {
        self.current().stats()
    }
}
