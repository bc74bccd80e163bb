//! Value conversion — raw option strings → typed values.

use thiserror::Error;

/// Errors raised while applying a parsed value onto a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Cannot convert string value '{value}' to {expected}.")]
    InvalidValue { value: String, expected: String },

    #[error("Cannot convert string value '{value}' to one of the allowed values (case insensitive): {}.", .choices.join(", "))]
    UnknownChoice { value: String, choices: Vec<String> },

    #[error("Expected {expected} value(s) but received {actual}.")]
    WrongValueCount { expected: usize, actual: usize },

    /// The target refused an otherwise well-formed value.
    #[error("{0}")]
    Rejected(String),
}

/// Parse a signed integer.
pub fn to_integer(value: &str) -> Result<i64, ConversionError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConversionError::InvalidValue {
            value: value.to_string(),
            expected: "an integer".to_string(),
        })
}

/// Match `value` against `choices` ignoring case.
///
/// Returns the choice in its declared spelling.
pub fn to_choice<'a>(value: &str, choices: &'a [String]) -> Result<&'a str, ConversionError> {
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(value))
        .map(String::as_str)
        .ok_or_else(|| ConversionError::UnknownChoice {
            value: value.to_string(),
            choices: choices.to_vec(),
        })
}
