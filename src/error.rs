//! Error types.

use thiserror::Error;

/// Errors reported by index construction and queries.
///
/// Every variant describes a programming error (a bad shape or a bad configuration); none of them
/// are transient, so retrying the same call will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two things that must agree on a length or dimensionality don't.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A construction parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A metric name that [`MetricKind`](crate::MetricKind) doesn't recognize.
    #[error("unknown metric: {0:?}")]
    UnknownMetric(String),

    /// An algorithm name that [`Algorithm`](crate::Algorithm) doesn't recognize.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// The metric can't bound distances to a region, which the algorithm needs.
    #[error("metric {metric} is not supported by the {algorithm} algorithm")]
    UnsupportedMetric {
        metric: &'static str,
        algorithm: &'static str,
    },
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::ShapeMismatch`].
    pub(crate) fn shape(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}
