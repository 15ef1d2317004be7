//! Prompt Generator Port - turns the idea and collected answers into a prompt.

use async_trait::async_trait;

use crate::domain::wizard::CleanedAnswers;

use super::ServiceError;

/// Port for the prompt-generation service.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    /// Builds the final prompt. `answers` never contains empty placeholders.
    async fn generate_prompt(
        &self,
        idea: &str,
        answers: &CleanedAnswers,
    ) -> Result<String, ServiceError>;
}
