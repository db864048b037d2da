//! Error types for macrometrics.

use thiserror::Error;

use crate::Frequency;

/// Result type alias for macrometrics operations.
pub type Result<T> = std::result::Result<T, MacroError>;

/// Errors raised when a model or quantity contract is violated.
#[derive(Error, Debug)]
pub enum MacroError {
    /// A shape or count does not match the declared model dimensions.
    #[error("Dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// What was being checked (e.g. "B", "lag history").
        context: &'static str,
        /// The expected shape or count.
        expected: String,
        /// The shape or count actually supplied.
        found: String,
    },

    /// Observation timestamps are not regularly spaced.
    #[error(transparent)]
    Spacing(#[from] SpacingError),

    /// Two sampled quantities have incompatible draw/chain axes.
    #[error("Sample shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Sample axes (draws, optional chains) of the left operand.
        left: Vec<usize>,
        /// Sample axes (draws, optional chains) of the right operand.
        right: Vec<usize>,
    },

    /// The operation is not defined for this kind of quantity.
    #[error("Unsupported operation: {operation} on {kind} quantity")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The estimation kind of the quantity.
        kind: &'static str,
    },

    /// Operand arrays cannot be combined by the requested operation.
    #[error("Non-conformable operands for {operation}: {left:?} and {right:?}")]
    NonConformable {
        /// The array operation that failed.
        operation: &'static str,
        /// Parameter shape of the left operand.
        left: Vec<usize>,
        /// Parameter shape of the right operand.
        right: Vec<usize>,
    },

    /// A covariance draw is not symmetric positive semi-definite.
    #[error("Invalid covariance at sample {sample}: {reason}")]
    InvalidCovariance {
        /// Flat sample index of the offending draw.
        sample: usize,
        /// Why the matrix was rejected.
        #[source]
        reason: CovarianceError,
    },

    /// An observation is NaN or infinite.
    #[error("Invalid observation at row {row}, column {column}: {value}")]
    InvalidData {
        /// Observation (time) index.
        row: usize,
        /// Variable index.
        column: usize,
        /// The offending value.
        value: f64,
    },

    /// An argument is outside its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MacroError {
    /// Builds a [`MacroError::DimensionMismatch`] comparing two shapes.
    #[must_use]
    pub fn shape(context: &'static str, expected: &[usize], found: &[usize]) -> Self {
        Self::DimensionMismatch {
            context,
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        }
    }

    /// Builds a [`MacroError::DimensionMismatch`] from free-form descriptions.
    #[must_use]
    pub fn dimension(
        context: &'static str,
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::DimensionMismatch {
            context,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Error for observation indices that are not regularly spaced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpacingError {
    /// The interval starting at `index` differs from the first interval.
    #[error(
        "Irregular spacing between observations {index} and {next}: expected interval {expected}, found {found}",
        next = .index + 1
    )]
    Irregular {
        /// Index of the first timestamp of the offending pair.
        index: usize,
        /// The reference interval (first delta).
        expected: f64,
        /// The interval actually observed.
        found: f64,
    },

    /// Timestamps do not strictly increase.
    #[error("Timestamps are not in chronological order at observation {index}")]
    NotChronological {
        /// Index of the first timestamp of the offending pair.
        index: usize,
    },

    /// A series reports no timestamp for a row inside its length.
    #[error("Missing timestamp for observation {index}")]
    MissingTimestamp {
        /// Row without a timestamp.
        index: usize,
    },

    /// The timestamp type cannot measure intervals in the requested unit.
    #[error("Timestamp type cannot measure intervals in {unit}")]
    UnsupportedFrequency {
        /// The requested unit.
        unit: Frequency,
    },
}

/// Why a matrix is not a valid covariance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CovarianceError {
    /// The matrix is not square.
    #[error("matrix is {rows}x{cols}, not square")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// An entry is NaN or infinite.
    #[error("non-finite entry {value}")]
    NonFinite {
        /// The offending value.
        value: f64,
    },

    /// Mirrored entries differ by more than the tolerance.
    #[error("not symmetric at ({row}, {col}): difference {gap:e}")]
    Asymmetric {
        /// Row of the lower-triangle entry.
        row: usize,
        /// Column of the lower-triangle entry.
        col: usize,
        /// Absolute difference from its mirror.
        gap: f64,
    },

    /// A Cholesky pivot is negative beyond the tolerance.
    #[error("not positive semi-definite: pivot {pivot} is {value:e}")]
    NegativePivot {
        /// Diagonal position of the pivot.
        pivot: usize,
        /// The pivot value.
        value: f64,
    },

    /// A zero pivot whose column does not vanish below it.
    #[error("not positive semi-definite: zero pivot {pivot} with coupling {coupling:e} to {row}")]
    CoupledZeroPivot {
        /// Diagonal position of the pivot.
        pivot: usize,
        /// Row carrying the non-zero remainder.
        row: usize,
        /// The remainder itself.
        coupling: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_message_names_both_observations() {
        let err = SpacingError::Irregular {
            index: 2,
            expected: 1.0,
            found: 2.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("observations 2 and 3"), "{msg}");
    }

    #[test]
    fn test_spacing_error_converts() {
        let err: MacroError = SpacingError::NotChronological { index: 0 }.into();
        assert!(matches!(
            err,
            MacroError::Spacing(SpacingError::NotChronological { index: 0 })
        ));
    }

    #[test]
    fn test_covariance_reason_is_source() {
        use std::error::Error as _;

        let err = MacroError::InvalidCovariance {
            sample: 3,
            reason: CovarianceError::NotSquare { rows: 2, cols: 3 },
        };
        assert_eq!(
            err.to_string(),
            "Invalid covariance at sample 3: matrix is 2x3, not square"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_shape_helper() {
        let err = MacroError::shape("B", &[2, 2], &[2, 3]);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in B: expected [2, 2], found [2, 3]"
        );
    }
}
