//! Error types for record-level parsing.
//!
//! Every variant here is fatal for the run: a database or marker file that
//! fails one of these checks cannot produce trustworthy distances.

use thiserror::Error;

/// A malformed required field in a database, marker or exclusion record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least {expected} tab-separated fields, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("invalid {field}: '{value}' is not an unsigned integer")]
    InvalidNumber { field: &'static str, value: String },

    #[error("gene id '{0}' is shorter than its 7-character prefix")]
    MissingGeneIdPrefix(String),

    #[error("unknown orientation signal '{0}': expected '+' or '-'")]
    UnknownOrientation(String),

    #[error("invalid distance threshold '{0}': expected an integer with optional 'k' suffix")]
    InvalidThreshold(String),
}

/// Parse an unsigned 32-bit field, naming the field on failure.
pub(crate) fn parse_u32(field: &'static str, value: &str) -> Result<u32, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
