//! Error types for the extraction pipeline

use thiserror::Error;

use crate::touchstone::TouchstoneError;

/// Fatal extraction errors
///
/// Per-sample numeric breakdowns are not errors; they surface as
/// [`Degeneracy`](crate::extraction::Degeneracy) flags on the result.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error(
        "Invalid frequency range: target {target} Hz must satisfy {start} Hz <= target < {stop} Hz"
    )]
    InvalidFrequencyRange { target: f64, start: f64, stop: f64 },

    #[error("Touchstone error: {0}")]
    Touchstone(#[from] TouchstoneError),
}

impl ExtractionError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ExtractionError::MalformedInput(message.into())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ExtractionError>;
