use thiserror::Error;

use crate::ephemeris::types::Graha;

/// Errors raised by chart and dasha calculations.
///
/// A dasha query that falls outside the computed timeline is not an error;
/// those queries return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JyotishError {
    #[error("Longitude {value} is not a finite angle in [0, 360) after normalization")]
    InvalidAngle { value: f64 },
    #[error("Chart has no position for {body:?}; it is required for this calculation")]
    MissingBodyPosition { body: Graha },
    #[error("Invalid {field}: {value} (expected {expected})")]
    InvalidLocation {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("Invalid birth time: {reason}")]
    InvalidBirthTime { reason: String },
    #[error("Invalid chart settings: {message}")]
    InvalidSettings { message: String },
}

pub type Result<T> = std::result::Result<T, JyotishError>;
