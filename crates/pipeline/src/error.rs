//! Error types for feature building and neighbor search.

use thiserror::Error;

/// Failures of the neighbor index for one query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeighborError {
    /// Asked for zero neighbors
    #[error("neighbor count must be at least 1, got {0}")]
    InvalidNeighborCount(usize),

    /// Asked for more neighbors than there are rows
    #[error("expected at most {samples} neighbors, got {requested}")]
    TooFewSamples { requested: usize, samples: usize },

    /// Query vector width differs from the fitted rows
    #[error("query has {found} features but the index was fitted on {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Nothing to search
    #[error("cannot fit a neighbor index on an empty feature table")]
    EmptyIndex,
}

/// Errors surfaced by the recommendation flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// A documented precondition of the feature table does not hold
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Neighbors(#[from] NeighborError),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
