//! Structural failures of an error analysis.

/// Why two arrays could not be analyzed against each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The arrays (or the input coordinates) are not index-aligned.
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// No samples to analyze.
    #[error("missing test data")]
    MissingData,
}

