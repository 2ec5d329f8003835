//! Error types for the reference math layer.
//!
//! Numeric degeneracies (near-zero denominators, negative power bases) are
//! resolved in place and never show up here. Only malformed parameter records
//! and disagreeing array shapes are reported.

/// Errors raised by the reference math layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefMathError {
    /// A parameter makes its formula undefined over the whole domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Field name as it appears in the parameter record.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// What the formula needs instead.
        reason: &'static str,
    },
    /// Two arrays that must be index-aligned have different lengths.
    #[error("shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Length of the reference side.
        expected: usize,
        /// Length of the other side.
        actual: usize,
    },
}

impl RefMathError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Fail with [`RefMathError::ShapeMismatch`] unless both lengths agree.
pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> Result<(), RefMathError> {
    if expected == actual {
        Ok(())
    } else {
        Err(RefMathError::ShapeMismatch { expected, actual })
    }
}
