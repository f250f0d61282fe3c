use rust_decimal::Decimal;
use thiserror::Error;

#[cfg(feature = "form")]
use crate::form::ValidationReport;

#[derive(Debug, Error)]
pub enum CardioRiskError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Out of range: {field} = {value} (expected {min} to {max})")]
    OutOfRange {
        field: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Conversion failed: {field} — {reason}")]
    Conversion { field: String, reason: String },

    #[error("Invalid scoring configuration: {parameter} — {reason}")]
    InvalidConfig { parameter: String, reason: String },

    #[cfg(feature = "form")]
    #[error("Validation failed: {0}")]
    ValidationFailed(Box<ValidationReport>),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CardioRiskError {
    fn from(e: serde_json::Error) -> Self {
        CardioRiskError::SerializationError(e.to_string())
    }
}
