//! Rectangular vector batches.
//!
//! A [`VectorBatch`] can only be built through validation, so anything that
//! reaches the index is known to be non-empty, uniform in length and finite.

use crate::error::{Result, VectorDbError};

/// A validated, row-major batch of vectors sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorBatch {
    dimension: usize,
    data: Vec<f32>,
}

impl VectorBatch {
    /// Validate `rows` and pack them into a batch.
    ///
    /// Row lengths are checked before any value is inspected, so a ragged
    /// batch always reports as ragged.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let first = rows.first().ok_or(VectorDbError::EmptyBatch)?;
        let dimension = first.len();
        if dimension == 0 {
            return Err(VectorDbError::InvalidDimension(0));
        }
        for (row, v) in rows.iter().enumerate() {
            if v.len() != dimension {
                return Err(VectorDbError::RaggedBatch { row, expected: dimension, got: v.len() });
            }
        }

        let mut data = Vec::with_capacity(rows.len() * dimension);
        for (row, v) in rows.iter().enumerate() {
            if let Some(column) = v.iter().position(|x| !x.is_finite()) {
                return Err(VectorDbError::NonFiniteValue { row, column });
            }
            data.extend_from_slice(v);
        }
        Ok(Self { dimension, data })
    }

    /// Validate a single vector (e.g. a query) as a one-row batch.
    pub fn single(vector: &[f32]) -> Result<Self> {
        if vector.is_empty() {
            return Err(VectorDbError::InvalidDimension(0));
        }
        if let Some(column) = vector.iter().position(|x| !x.is_finite()) {
            return Err(VectorDbError::NonFiniteValue { row: 0, column });
        }
        Ok(Self { dimension: vector.len(), data: vector.to_vec() })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors in the batch.
    pub fn rows(&self) -> usize {
        self.data.len() / self.dimension
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimension)
    }

    pub(crate) fn into_data(self) -> Vec<f32> {
        self.data
    }
}
