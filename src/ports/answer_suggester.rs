//! Answer Suggester Port - proposes an answer for one question.

use async_trait::async_trait;

use crate::domain::wizard::{Suggestion, SuggestionRequest};

use super::ServiceError;

/// Port for the per-question suggestion service.
///
/// The request carries the idea, the question, and the cleaned answers decided
/// so far, so implementations can keep later suggestions consistent with
/// earlier ones.
#[async_trait]
pub trait AnswerSuggester: Send + Sync {
    /// Suggests an answer for `request.question`.
    async fn suggest_answer(&self, request: SuggestionRequest) -> Result<Suggestion, ServiceError>;
}
