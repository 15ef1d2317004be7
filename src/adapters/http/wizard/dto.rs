//! Wire types for the wizard service protocol.
//!
//! Shared by the axum handlers and the HTTP client so both ends agree on
//! field names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::wizard::{CleanedAnswers, Question, QuestionType};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// POST /generate-questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub description: String,
}

/// POST /generate-prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePromptRequest {
    #[serde(default)]
    pub idea: String,
    pub parameters: CleanedAnswers,
}

/// POST /suggest-answer carries a `SuggestionRequest` and returns a `Suggestion`
/// unchanged, so those domain types double as their own DTOs.
pub use crate::domain::wizard::{
    Suggestion as SuggestAnswerResponse, SuggestionRequest as SuggestAnswerRequest,
};

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// A question on the wire.
///
/// Older services send bare question strings; those become required text
/// questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireQuestion {
    Typed(Question),
    Legacy(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuestionsResponse {
    #[serde(default)]
    pub idea: String,
    pub questions: Vec<WireQuestion>,
}

impl GenerateQuestionsResponse {
    pub fn new(idea: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            idea: idea.into(),
            questions: questions.into_iter().map(WireQuestion::Typed).collect(),
        }
    }

    /// Converts to domain questions; legacy entries get ids `q1`, `q2`, ... by position.
    ///
    /// A positional id already used by a typed question moves to the next free number.
    pub fn into_questions(self) -> Vec<Question> {
        let mut taken: HashSet<String> = self
            .questions
            .iter()
            .filter_map(|question| match question {
                WireQuestion::Typed(question) => Some(question.id.clone()),
                WireQuestion::Legacy(_) => None,
            })
            .collect();

        self.questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| match question {
                WireQuestion::Typed(question) => question,
                WireQuestion::Legacy(text) => {
                    let mut n = index + 1;
                    while taken.contains(&format!("q{n}")) {
                        n += 1;
                    }
                    let id = format!("q{n}");
                    taken.insert(id.clone());
                    Question::new(id, QuestionType::Text, text).required()
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePromptResponse {
    pub prompt: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_questions_become_required_text() {
        let response: GenerateQuestionsResponse = serde_json::from_value(json!({
            "idea": "Recipe app",
            "questions": ["Who is the target user?", "What platform?"]
        }))
        .unwrap();

        let questions = response.into_questions();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, "q2");
        assert_eq!(questions[1].question, "What platform?");
        assert_eq!(questions[1].question_type, QuestionType::Text);
        assert!(questions[1].required);
    }

    #[test]
    fn typed_and_legacy_questions_mix() {
        let response: GenerateQuestionsResponse = serde_json::from_value(json!({
            "questions": [
                {"id": "platform", "type": "single_select", "question": "Platform?", "choices": ["Web"]},
                "Anything else?"
            ]
        }))
        .unwrap();

        let questions = response.into_questions();

        assert_eq!(questions[0].id, "platform");
        assert_eq!(questions[0].question_type, QuestionType::SingleSelect);
        assert!(!questions[0].required);
        assert_eq!(questions[1].id, "q2");
    }

    #[test]
    fn legacy_ids_skip_ids_used_by_typed_questions() {
        let response: GenerateQuestionsResponse = serde_json::from_value(json!({
            "questions": [
                "Who is it for?",
                "Anything else?",
                {"id": "q2", "type": "text", "question": "Budget?"},
                {"id": "q3", "type": "text", "question": "Timeline?"}
            ]
        }))
        .unwrap();

        let ids: Vec<String> = response.into_questions().into_iter().map(|q| q.id).collect();

        assert_eq!(ids, vec!["q1", "q4", "q2", "q3"]);
    }

    #[test]
    fn prompt_request_idea_is_optional() {
        let request: GeneratePromptRequest =
            serde_json::from_value(json!({"parameters": {"platform": "Web"}})).unwrap();

        assert_eq!(request.idea, "");
        assert_eq!(request.parameters.len(), 1);
    }
}
