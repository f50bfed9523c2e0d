//! Error types for benford.

use std::path::PathBuf;

use crate::validate::ValidationReport;

/// Result type alias for benford operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in benford operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON decode/encode error at the input or output boundary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input payload is not a sequence of values.
    #[error("input is not a sequence of values")]
    NotASequence,

    /// A cell could not be used on the validation-skipping path, where the
    /// caller asserts the data is already cleaned.
    #[error("malformed input at row {index}: {reason} (value: '{value}')")]
    MalformedInput {
        /// Zero-based index of the offending cell.
        index: usize,
        /// Rendering of the original cell.
        value: String,
        /// Why the cell was rejected.
        reason: String,
    },

    /// The dataset failed the readiness thresholds; statistics were not
    /// computed. Carries the full quality report for diagnostics.
    #[error(
        "insufficient data: {} valid of {} records ({:.2}% complete)",
        .report.valid_records,
        .report.total_records,
        .report.data_completeness
    )]
    InsufficientData {
        /// The validation report that failed the readiness decision.
        report: Box<ValidationReport>,
    },

    /// No leading digits were observed even though the data was judged
    /// ready. Internal invariant violation; fails loudly instead of
    /// producing NaN statistics.
    #[error("degenerate distribution: no leading digits observed")]
    DegenerateDistribution,
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a malformed input error for one cell.
    pub fn malformed_input(
        index: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            index,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error from a validation report.
    pub fn insufficient_data(report: ValidationReport) -> Self {
        Self::InsufficientData {
            report: Box::new(report),
        }
    }
}
