//! Error types for schema construction and response parsing.

use crate::FieldPath;
use thiserror::Error;

/// Errors raised while building a protocol.
///
/// These describe a mistake in a schema definition. Protocols are built
/// once at startup, so callers usually treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Duplicate field name: '{path}'")]
    DuplicateFieldName { path: FieldPath },

    #[error("Constant field '{path}' has no allowed values")]
    EmptyAllowedValues { path: FieldPath },

    #[error("Constant field '{path}' lists '{value}' more than once")]
    DuplicateAllowedValue { path: FieldPath, value: String },

    #[error("Object field '{path}' has no attributes")]
    EmptyObjectAttributes { path: FieldPath },

    #[error("Invalid field name '{name}': {reason}")]
    InvalidFieldName { name: String, reason: String },
}

/// Errors raised while parsing a response against a protocol.
///
/// Each variant names the offending field so a retry loop can explain the
/// problem to the model; see [`ParseError::feedback`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Missing required field '{path}'")]
    MissingRequiredField { path: FieldPath },

    #[error("Invalid value '{found}' for '{path}' (expected one of: {})", .allowed.join(" | "))]
    InvalidConstantValue {
        path: FieldPath,
        found: String,
        allowed: Vec<String>,
    },

    #[error("Malformed list item in '{path}': {reason}")]
    MalformedListItem { path: FieldPath, reason: String },

    #[error("Unrecognized content before the first field: '{content}'")]
    UnrecognizedTrailingContent { content: String },
}

impl ParseError {
    /// Maximum stray content length kept before truncation.
    const MAX_CONTENT_LEN: usize = 100;

    /// Creates an `UnrecognizedTrailingContent` error, truncating long content.
    pub fn unrecognized(content: &str) -> Self {
        let content = match content.char_indices().nth(Self::MAX_CONTENT_LEN) {
            Some((cut, _)) => format!("{}...", &content[..cut]),
            None => content.to_string(),
        };
        ParseError::UnrecognizedTrailingContent { content }
    }

    /// Returns the path of the offending field, if the error has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ParseError::MissingRequiredField { path }
            | ParseError::InvalidConstantValue { path, .. }
            | ParseError::MalformedListItem { path, .. } => Some(path),
            ParseError::UnrecognizedTrailingContent { .. } => None,
        }
    }

    /// Corrective instruction to append to the next prompt after a failed parse.
    pub fn feedback(&self) -> String {
        match self {
            ParseError::MissingRequiredField { path } => format!(
                "Your previous response did not include the required field `{path}`. \
                 Reply again using the exact format described, including every required field."
            ),
            ParseError::InvalidConstantValue {
                path,
                found,
                allowed,
            } => format!(
                "`{found}` is not a valid value for `{path}`. Use exactly one of: {}.",
                allowed.join(" | ")
            ),
            ParseError::MalformedListItem { path, reason } => format!(
                "The list in `{path}` is malformed: {reason}. \
                 Write each item on its own line and do not leave items empty."
            ),
            ParseError::UnrecognizedTrailingContent { .. } => {
                "Your previous response started with text outside the requested format. \
                 Begin directly with the first field."
                    .to_string()
            }
        }
    }
}
