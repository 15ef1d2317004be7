//! Template wizard services - deterministic, model-free implementations.
//!
//! Serves a fixed three-question schema and renders the prompt from the
//! answers as JSON. Used by the reference server and for local development.

use async_trait::async_trait;

use crate::domain::wizard::{
    AnswerValue, CleanedAnswers, Question, QuestionType, Suggestion, SuggestionRequest,
};
use crate::ports::{AnswerSuggester, PromptGenerator, QuestionGenerator, ServiceError};

const PLATFORMS: [&str; 4] = ["Web", "iOS", "Android", "Desktop"];
const FEATURES: [&str; 5] = [
    "Authentication",
    "Payments",
    "Notifications",
    "Offline mode",
    "Analytics",
];

/// Fixed-schema implementation of every wizard port.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateWizardServices;

impl TemplateWizardServices {
    pub fn new() -> Self {
        Self
    }

    /// The schema served for every idea.
    pub fn questions() -> Vec<Question> {
        vec![
            Question::new("target_user", QuestionType::Text, "Who is the target user?")
                .required()
                .with_placeholder("e.g. busy parents, indie developers"),
            Question::new(
                "platform",
                QuestionType::SingleSelect,
                "What platform should the app run on?",
            )
            .required()
            .with_choices(PLATFORMS),
            Question::new(
                "core_features",
                QuestionType::MultiSelect,
                "What are the core features?",
            )
            .with_choices(FEATURES),
        ]
    }

    fn suggest_text(request: &SuggestionRequest) -> String {
        let idea = request.idea.trim();
        let earlier: Vec<String> = request
            .current_answers
            .iter()
            .map(|(id, value)| format!("{id}={}", value.to_display_string()))
            .collect();

        if earlier.is_empty() {
            format!("People who would use {idea}")
        } else {
            format!("People who would use {idea} ({})", earlier.join("; "))
        }
    }
}

#[async_trait]
impl QuestionGenerator for TemplateWizardServices {
    async fn generate_questions(&self, idea: &str) -> Result<Vec<Question>, ServiceError> {
        tracing::debug!(idea_len = idea.len(), "Serving template questions");
        Ok(Self::questions())
    }
}

#[async_trait]
impl AnswerSuggester for TemplateWizardServices {
    async fn suggest_answer(&self, request: SuggestionRequest) -> Result<Suggestion, ServiceError> {
        let question = &request.question;
        let value = match &question.question_type {
            QuestionType::SingleSelect => question
                .choices()
                .first()
                .map(AnswerValue::text)
                .unwrap_or_else(AnswerValue::empty_text),
            QuestionType::MultiSelect => AnswerValue::choices(question.choices().iter().take(2)),
            QuestionType::Boolean => AnswerValue::Bool(true),
            QuestionType::Number => AnswerValue::from(1i64),
            QuestionType::Text | QuestionType::Textarea => {
                AnswerValue::text(Self::suggest_text(&request))
            }
            QuestionType::Unsupported(tag) => {
                return Err(ServiceError::status(
                    422,
                    format!("cannot suggest answers for question type '{tag}'"),
                ));
            }
        };

        Ok(Suggestion::new(question.id.clone(), value))
    }
}

#[async_trait]
impl PromptGenerator for TemplateWizardServices {
    async fn generate_prompt(
        &self,
        idea: &str,
        answers: &CleanedAnswers,
    ) -> Result<String, ServiceError> {
        let parameters = serde_json::to_string(answers)
            .map_err(|e| ServiceError::invalid_response(e.to_string()))?;

        let idea = idea.trim();
        if idea.is_empty() {
            Ok(format!("Build an app with these parameters: {parameters}"))
        } else {
            Ok(format!(
                "Idea: {idea}\nBuild an app with these parameters: {parameters}"
            ))
        }
    }
}
