//! Error types for model construction.

use thiserror::Error;

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when a [`Model`](crate::Model) would break its
/// `facets.len() == face_count` invariant or cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// More facets than a 32-bit count can describe.
    #[error("too many facets for a binary STL: {len} (limit is {})", u32::MAX)]
    TooManyFacets {
        /// Number of facets supplied.
        len: usize,
    },

    /// A declared facet count disagrees with the facet sequence.
    #[error("facet count mismatch: declared {declared}, found {actual}")]
    CountMismatch {
        /// Count carried alongside the facets.
        declared: u32,
        /// Actual number of facets.
        actual: usize,
    },

    /// A facet holds a NaN or infinite component, which has no JSON
    /// representation.
    #[error("facet {index} has a non-finite component")]
    NonFinite {
        /// Position of the first offending facet.
        index: usize,
    },
}
