use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorDbError {
    #[error("Batch contains no vectors")]
    EmptyBatch,
    #[error("Ragged batch: row {row} has length {got}, expected {expected}")]
    RaggedBatch { row: usize, expected: usize, got: usize },
    #[error("Non-finite value at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize },
    #[error("Invalid dimension: {0} (must be at least 1)")]
    InvalidDimension(usize),
    #[error("Invalid top_k: {0} (must be at least 1)")]
    InvalidTopK(usize),
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Index is not initialized; add vectors before searching")]
    Uninitialized,
}

impl VectorDbError {
    /// True for errors caused by the caller's input rather than index state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch
                | Self::RaggedBatch { .. }
                | Self::NonFiniteValue { .. }
                | Self::InvalidDimension(_)
                | Self::InvalidTopK(_)
                | Self::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VectorDbError>;
