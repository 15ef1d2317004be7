//! Question Generator Port - turns an idea into a clarifying-question schema.

use async_trait::async_trait;

use crate::domain::wizard::Question;

use super::ServiceError;

/// Port for the question-generation service.
///
/// # Example
///
/// ```ignore
/// let questions = generator.generate_questions("A habit tracker for teams").await?;
/// let schema = QuestionSchema::new(questions);
/// ```
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Returns the ordered questions for `idea`.
    async fn generate_questions(&self, idea: &str) -> Result<Vec<Question>, ServiceError>;
}
