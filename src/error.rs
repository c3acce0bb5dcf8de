use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Typed errors for the data and report layers
// ---------------------------------------------------------------------------

/// Errors raised while reading result tables or assembling a report.
///
/// `MissingInput` is the only variant a report treats as recoverable: the
/// pipeline turns it into a skipped report instead of a failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("input file '{}' not found", path.display())]
    MissingInput { path: PathBuf },

    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("row {row} ({instance}): '{value}' in column '{column}' is not a number")]
    NotNumeric {
        column: String,
        row: usize,
        instance: String,
        value: String,
    },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Whether this error only means the input file is absent.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ReportError::MissingInput { .. })
    }
}
