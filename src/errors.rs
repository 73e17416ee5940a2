use thiserror::Error;

use crate::parser::Field;

/// Tagged failure of a solve. The `Display` text is the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),
    #[error("Contradictory input: {0}")]
    Contradiction(String),
    #[error("Indeterminate: {0}")]
    Indeterminate(String),
    #[error("Invalid frequency: {0} Hz (must be > 0 and finite)")]
    InvalidFrequency(f64),
    #[error("Invalid {quantity}: {value} (must be > 0 and finite)")]
    InvalidValue { quantity: &'static str, value: f64 },
    #[error("Unknown topology: {0} (expected \"series\" or \"parallel\")")]
    UnknownTopology(String),
}

impl CircuitError {
    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientInput(message.into())
    }

    pub fn contradiction(message: impl Into<String>) -> Self {
        Self::Contradiction(message.into())
    }

    pub fn indeterminate(message: impl Into<String>) -> Self {
        Self::Indeterminate(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error in {field} field ({input:?}): {message}")]
pub struct ParseError {
    pub field: Field,
    pub input: String,
    pub message: String,
}
