//! Mock wizard services for testing.
//!
//! Implements all three collaborator ports with queued responses, so tests can
//! drive the wizard without a backend.
//!
//! # Features
//!
//! - Queued responses per port, consumed in order
//! - Deterministic fallbacks once a queue is empty
//! - Error injection
//! - Call tracking for verification
//! - A suggestion gate for interleaving user edits with in-flight calls
//!
//! # Example
//!
//! ```ignore
//! let services = MockWizardServices::new()
//!     .with_questions(vec![Question::new("who", QuestionType::Text, "Who?")])
//!     .with_suggestion(AnswerValue::text("Chefs"));
//!
//! let wizard = WizardController::with_services(Arc::new(services.clone()));
//! wizard.load_schema("Recipe app").await?;
//! wizard.start_auto_fill().await?;
//! assert_eq!(services.suggestion_calls().len(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

use crate::domain::wizard::{
    AnswerValue, CleanedAnswers, Question, QuestionType, Suggestion, SuggestionRequest,
};
use crate::ports::{AnswerSuggester, PromptGenerator, QuestionGenerator, ServiceError};

/// Holds suggestion calls until released.
///
/// Each call signals `started`, then waits for one `release` notification.
#[derive(Debug, Clone, Default)]
pub struct SuggestionGate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl SuggestionGate {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Configurable mock for every wizard port.
#[derive(Debug, Clone, Default)]
pub struct MockWizardServices {
    questions: Arc<Mutex<VecDeque<Result<Vec<Question>, ServiceError>>>>,
    suggestions: Arc<Mutex<VecDeque<Result<AnswerValue, ServiceError>>>>,
    prompts: Arc<Mutex<VecDeque<Result<String, ServiceError>>>>,
    delay: Duration,
    gate: Option<SuggestionGate>,
    question_calls: Arc<Mutex<Vec<String>>>,
    suggestion_calls: Arc<Mutex<Vec<SuggestionRequest>>>,
    prompt_calls: Arc<Mutex<Vec<(String, CleanedAnswers)>>>,
}

impl MockWizardServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a question schema.
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        lock(&self.questions).push_back(Ok(questions));
        self
    }

    /// Queues a question-generation failure.
    pub fn with_questions_error(self, error: ServiceError) -> Self {
        lock(&self.questions).push_back(Err(error));
        self
    }

    /// Queues a suggested value; the id always echoes the requested question.
    pub fn with_suggestion(self, value: impl Into<AnswerValue>) -> Self {
        lock(&self.suggestions).push_back(Ok(value.into()));
        self
    }

    /// Queues a suggestion failure.
    pub fn with_suggestion_error(self, error: ServiceError) -> Self {
        lock(&self.suggestions).push_back(Err(error));
        self
    }

    /// Queues a generated prompt.
    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        lock(&self.prompts).push_back(Ok(prompt.into()));
        self
    }

    /// Queues a prompt-generation failure.
    pub fn with_prompt_error(self, error: ServiceError) -> Self {
        lock(&self.prompts).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Holds every suggestion call on `gate`.
    pub fn with_suggestion_gate(mut self, gate: SuggestionGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Ideas passed to `generate_questions`.
    pub fn question_calls(&self) -> Vec<String> {
        lock(&self.question_calls).clone()
    }

    /// Requests passed to `suggest_answer`.
    pub fn suggestion_calls(&self) -> Vec<SuggestionRequest> {
        lock(&self.suggestion_calls).clone()
    }

    /// Arguments passed to `generate_prompt`.
    pub fn prompt_calls(&self) -> Vec<(String, CleanedAnswers)> {
        lock(&self.prompt_calls).clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Fallback suggestion once the queue runs dry.
fn default_suggestion(question: &Question) -> AnswerValue {
    match &question.question_type {
        QuestionType::SingleSelect => question
            .choices()
            .first()
            .map(AnswerValue::text)
            .unwrap_or_else(AnswerValue::empty_text),
        QuestionType::MultiSelect => AnswerValue::choices(question.choices().iter().take(1)),
        QuestionType::Boolean => AnswerValue::Bool(true),
        QuestionType::Number => AnswerValue::from(1i64),
        _ => AnswerValue::text(format!("mock answer for {}", question.id)),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl QuestionGenerator for MockWizardServices {
    async fn generate_questions(&self, idea: &str) -> Result<Vec<Question>, ServiceError> {
        lock(&self.question_calls).push(idea.to_string());
        self.simulate_latency().await;

        lock(&self.questions).pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl AnswerSuggester for MockWizardServices {
    async fn suggest_answer(&self, request: SuggestionRequest) -> Result<Suggestion, ServiceError> {
        lock(&self.suggestion_calls).push(request.clone());

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        self.simulate_latency().await;

        let queued = lock(&self.suggestions).pop_front();
        let value = match queued {
            Some(result) => result?,
            None => default_suggestion(&request.question),
        };
        Ok(Suggestion::new(request.question.id, value))
    }
}

#[async_trait]
impl PromptGenerator for MockWizardServices {
    async fn generate_prompt(
        &self,
        idea: &str,
        answers: &CleanedAnswers,
    ) -> Result<String, ServiceError> {
        lock(&self.prompt_calls).push((idea.to_string(), answers.clone()));
        self.simulate_latency().await;

        lock(&self.prompts)
            .pop_front()
            .unwrap_or_else(|| Ok(format!("Prompt for {idea}")))
    }
}
