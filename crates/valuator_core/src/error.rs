use std::fmt;

/// Errors raised while building a `ValuationInputs` snapshot.
///
/// Domain invalidity (discount rate at or below growth, zero divisors) is never
/// an error; it resolves to a sentinel or fallback value inside each model.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// No field with this name exists in the targeted suite
    UnknownField { suite: &'static str, field: String },
    /// No suite with this name exists
    UnknownSuite(String),
    /// Field values must be finite reals
    NonFinite { field: &'static str, value: f64 },
    /// Period counts must be whole, non-negative numbers
    InvalidCount { field: &'static str, value: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnknownField { suite, field } => {
                write!(f, "unknown {suite} input field '{field}'")
            }
            InputError::UnknownSuite(name) => write!(f, "unknown suite '{name}'"),
            InputError::NonFinite { field, value } => {
                write!(f, "field '{field}' must be finite (got {value})")
            }
            InputError::InvalidCount { field, value } => {
                write!(
                    f,
                    "field '{field}' must be a non-negative whole number (got {value})"
                )
            }
        }
    }
}

impl std::error::Error for InputError {}

pub type Result<T> = std::result::Result<T, InputError>;
