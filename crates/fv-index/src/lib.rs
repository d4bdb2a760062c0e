//! flatvec index - exact nearest-neighbour search over a flat L2 store.
//!
//! Provides rectangular batch validation, squared-Euclidean distance and a
//! brute-force index that a single writer appends to while readers search
//! immutable snapshots.

pub mod batch;
pub mod distance;
pub mod index;
pub mod error;

pub use batch::VectorBatch;
pub use index::{FlatIndex, IndexState, IndexStats, SearchResult, VectorIndex, DEFAULT_TOP_K};
pub use error::{VectorDbError, Result};
