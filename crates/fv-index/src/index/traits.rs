use crate::batch::VectorBatch;
use crate::error::Result;
use super::{IndexState, IndexStats, SearchResult};

/// Core trait for vector index implementations.
pub trait VectorIndex: Send + Sync {
    /// Fix the dimension of an uninitialized index.
    fn initialize(&self, dimension: usize) -> Result<()>;

    /// Append a validated batch. Returns the new total count.
    fn add(&self, batch: VectorBatch) -> Result<usize>;

    /// Validate raw rows and append them.
    fn add_rows(&self, rows: &[Vec<f32>]) -> Result<usize> {
        self.add(VectorBatch::from_rows(rows)?)
    }

    /// Search for the top-k nearest vectors.
    fn search(&self, query: &[f32], top_k: usize) -> Result<SearchResult>;

    /// Copy of the vector stored at `position`.
    fn get(&self, position: usize) -> Option<Vec<f32>>;

    /// Get the number of vectors in the index.
    fn len(&self) -> usize;

    /// Check if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension, once fixed.
    fn dimension(&self) -> Option<usize>;

    fn state(&self) -> IndexState {
        match self.dimension() {
            Some(_) => IndexState::Ready,
            None => IndexState::Uninitialized,
        }
    }

    fn stats(&self) -> IndexStats {
        IndexStats { state: self.state(), dimension: self.dimension(), size: self.len() }
    }
}
