//! Error types for the wizard domain

use crate::domain::foundation::ErrorCode;
use crate::ports::ServiceError;

/// Errors surfaced by wizard commands.
///
/// Every variant's display string is what lands in the wizard's "last error" slot.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum WizardError {
    #[error("Could not load questions: {0}")]
    SchemaLoad(#[source] ServiceError),

    #[error("Could not suggest an answer for '{question_id}': {source}")]
    Suggestion {
        question_id: String,
        #[source]
        source: ServiceError,
    },

    #[error("Could not generate prompt: {0}")]
    PromptGeneration(#[source] ServiceError),

    #[error("Question '{question_id}' has unsupported type '{type_tag}'")]
    UnsupportedQuestionType {
        question_id: String,
        type_tag: String,
    },

    #[error("Invalid answer for '{question_id}': {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    #[error("Please answer all required questions: {}", .0.join(", "))]
    MissingRequiredAnswers(Vec<String>),

    #[error("Please describe your idea first")]
    EmptyIdea,
}

impl WizardError {
    pub fn invalid_answer(question_id: impl Into<String>, reason: impl Into<String>) -> Self {
        WizardError::InvalidAnswer {
            question_id: question_id.into(),
            reason: reason.into(),
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::SchemaLoad(_) => ErrorCode::SchemaLoadFailed,
            WizardError::Suggestion { .. } => ErrorCode::SuggestionFailed,
            WizardError::PromptGeneration(_) => ErrorCode::PromptGenerationFailed,
            WizardError::UnsupportedQuestionType { .. } => ErrorCode::UnsupportedQuestionType,
            WizardError::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            WizardError::MissingRequiredAnswers(_) => ErrorCode::MissingRequiredAnswers,
            WizardError::EmptyIdea => ErrorCode::EmptyIdea,
        }
    }

    /// Returns true for failures of a remote collaborator.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            WizardError::SchemaLoad(_)
                | WizardError::Suggestion { .. }
                | WizardError::PromptGeneration(_)
        )
    }
}
