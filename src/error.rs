//! Input-layer errors.
//!
//! The allocation core is infallible; everything that can fail happens
//! while acquiring and checking input.

use std::path::PathBuf;

use crate::validation::ValidationError;

/// Failure while acquiring or checking an allocation problem.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// A scenario file could not be read.
    #[error("failed to read scenario file {}", .path.display())]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A scenario file could not be written.
    #[error("failed to write scenario file {}", .path.display())]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading answers or writing prompts failed.
    #[error("i/o error during interactive input: {0}")]
    Io(#[from] std::io::Error),
    /// Scenario text is not a valid scenario document.
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// An interactive answer did not parse as the expected type.
    #[error("invalid value for {field}: {value:?}")]
    Parse {
        /// Field being asked for.
        field: String,
        /// Raw answer.
        value: String,
    },
    /// Input ended before the named field was answered.
    #[error("input ended while reading {0}")]
    UnexpectedEof(String),
    /// The problem failed structural validation.
    #[error("scenario failed validation: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for the input layer.
pub type InputResult<T> = std::result::Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_message_lists_problems() {
        let err = InputError::Invalid(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate test ID: 3"),
            ValidationError::new(ValidationErrorKind::NegativeValue, "Resource 'R0' has negative capacity"),
        ]);
        assert_eq!(
            err.to_string(),
            "scenario failed validation: Duplicate test ID: 3; Resource 'R0' has negative capacity"
        );
    }

    #[test]
    fn test_parse_message() {
        let err = InputError::Parse {
            field: "budget".into(),
            value: "lots".into(),
        };
        assert_eq!(err.to_string(), "invalid value for budget: \"lots\"");
    }
}
