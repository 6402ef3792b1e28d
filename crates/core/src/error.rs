//! Error types for the colocation pattern mining engine.

use thiserror::Error;

use crate::types::PatternKey;

/// Errors produced while mining colocation patterns.
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("radius must be a positive, finite number, got {0}")]
    InvalidRadius(f64),

    #[error("min_prevalence must be in [0, 1], got {0}")]
    InvalidPrevalence(f64),

    #[error("point set is empty")]
    EmptyPointSet,

    #[error("instance {id} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { id: u64, x: f64, y: f64 },

    #[error("duplicate instance id: {id}")]
    DuplicateInstance { id: u64 },

    #[error("pattern {pattern} exceeded the instance cap ({limit}); refine radius or min_prevalence")]
    ResourceExhausted { pattern: PatternKey, limit: usize },

    #[error("mining run was cancelled")]
    Cancelled,
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, MiningError>;

/// Errors produced while loading points from an external source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error reading point source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("malformed GeoJSON: {0}")]
    MalformedGeoJson(String),

    #[error("missing type property {property:?} on feature {index}")]
    MissingTypeProperty { index: usize, property: String },
}

/// Convenience alias for loader results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

impl MiningError {
    /// Constructs a [`MiningError::ResourceExhausted`] naming the offending
    /// type combination, reconstructed from its dense type indices.
    pub(crate) fn resource_exhausted(type_idxs: &[usize], limit: usize) -> Self {
        let types = type_idxs
            .iter()
            .map(|&idx| crate::types::FeatureTypeId(idx as u32))
            .collect();
        Self::ResourceExhausted { pattern: PatternKey::new(types), limit }
    }
}
