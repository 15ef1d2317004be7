//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable, machine-readable error codes surfaced alongside error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors
    EmptyIdea,
    InvalidAnswer,
    MissingRequiredAnswers,

    // Schema errors
    UnsupportedQuestionType,

    // Collaborator errors
    SchemaLoadFailed,
    SuggestionFailed,
    PromptGenerationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyIdea => "EMPTY_IDEA",
            ErrorCode::InvalidAnswer => "INVALID_ANSWER",
            ErrorCode::MissingRequiredAnswers => "MISSING_REQUIRED_ANSWERS",
            ErrorCode::UnsupportedQuestionType => "UNSUPPORTED_QUESTION_TYPE",
            ErrorCode::SchemaLoadFailed => "SCHEMA_LOAD_FAILED",
            ErrorCode::SuggestionFailed => "SUGGESTION_FAILED",
            ErrorCode::PromptGenerationFailed => "PROMPT_GENERATION_FAILED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("choices", "duplicate entry 'Web'");
        assert_eq!(
            format!("{}", err),
            "Field 'choices' has invalid format: duplicate entry 'Web'"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::SuggestionFailed), "SUGGESTION_FAILED");
        assert_eq!(
            format!("{}", ErrorCode::UnsupportedQuestionType),
            "UNSUPPORTED_QUESTION_TYPE"
        );
    }
}
