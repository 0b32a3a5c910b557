//! Error type shared by every estimator in the crate.

use thiserror::Error;

use crate::types::Axis;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CopulaError>;

/// Errors raised while estimating distributions or significance bands.
///
/// Every operation is a pure computation, so errors are raised at the point
/// of detection and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopulaError {
    /// Zero observations were supplied to a marginal or joint estimate.
    #[error("cannot estimate a distribution from zero observations")]
    EmptyInput,

    /// A supplied value ordering is not a permutation of the observed values.
    #[error("invalid ordering for the {axis} axis: {reason}")]
    InvalidOrdering {
        /// Axis the ordering was supplied for.
        axis: Axis,
        /// What was wrong with it.
        reason: String,
    },

    /// `p_levels_low` is empty, unsorted, or outside `(0, 0.5)`.
    #[error("invalid significance levels: {0}")]
    InvalidSignificanceLevels(String),

    /// The independent baseline is zero at a cell present in the joint table.
    #[error("independent baseline probability is zero at cell ({row}, {column})")]
    DegenerateBaseline {
        /// Debug rendering of the row value.
        row: String,
        /// Debug rendering of the column value.
        column: String,
    },

    /// `n_bootstraps` was zero.
    #[error("at least one bootstrap resample is required")]
    InvalidBootstrapCount,

    /// Two sample columns of different lengths were paired.
    #[error("sample columns differ in length ({first} vs {second})")]
    LengthMismatch {
        /// Length of the first column.
        first: usize,
        /// Length of the second column.
        second: usize,
    },

    /// A category value appears more than once in a pmf or table axis.
    #[error("value {0} appears more than once")]
    DuplicateValue(String),

    /// A value matrix does not match the number of row and column labels.
    #[error("table shape mismatch: labels describe {expected:?}, values are {found:?}")]
    ShapeMismatch {
        /// `(rows, columns)` implied by the labels.
        expected: (usize, usize),
        /// `(rows, columns)` of the supplied matrix.
        found: (usize, usize),
    },
}
