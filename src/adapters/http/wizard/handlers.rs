//! HTTP handlers for the wizard service endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{AnswerSuggester, PromptGenerator, QuestionGenerator, ServiceError};

use super::dto::{
    ErrorResponse, GeneratePromptRequest, GeneratePromptResponse, GenerateQuestionsRequest,
    GenerateQuestionsResponse, SuggestAnswerRequest,
};

/// Application state for wizard endpoints.
#[derive(Clone)]
pub struct WizardApiState {
    pub questions: Arc<dyn QuestionGenerator>,
    pub suggester: Arc<dyn AnswerSuggester>,
    pub prompts: Arc<dyn PromptGenerator>,
}

impl WizardApiState {
    /// Serves every endpoint from one implementation.
    pub fn from_services<S>(services: Arc<S>) -> Self
    where
        S: QuestionGenerator + AnswerSuggester + PromptGenerator + 'static,
    {
        Self {
            questions: services.clone(),
            suggester: services.clone(),
            prompts: services,
        }
    }
}

/// Generate the question schema for an idea.
///
/// POST /generate-questions
pub async fn generate_questions(
    State(state): State<WizardApiState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Response {
    let idea = request.description.trim();
    if idea.is_empty() {
        return bad_request("description must not be empty");
    }

    match state.questions.generate_questions(idea).await {
        Ok(questions) => Json(GenerateQuestionsResponse::new(idea, questions)).into_response(),
        Err(err) => service_error_response(&err),
    }
}

/// Suggest an answer for one question.
///
/// POST /suggest-answer
pub async fn suggest_answer(
    State(state): State<WizardApiState>,
    Json(request): Json<SuggestAnswerRequest>,
) -> Response {
    match state.suggester.suggest_answer(request).await {
        Ok(suggestion) => Json(suggestion).into_response(),
        Err(err) => service_error_response(&err),
    }
}

/// Render the final prompt.
///
/// POST /generate-prompt
pub async fn generate_prompt(
    State(state): State<WizardApiState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Response {
    match state
        .prompts
        .generate_prompt(&request.idea, &request.parameters)
        .await
    {
        Ok(prompt) => Json(GeneratePromptResponse { prompt }).into_response(),
        Err(err) => service_error_response(&err),
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// Maps a port failure onto the status a client would have seen upstream.
fn service_error_response(err: &ServiceError) -> Response {
    tracing::warn!(error = %err, "Wizard service call failed");

    let status = match err {
        ServiceError::Status { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ServiceError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ServiceError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Network(_) | ServiceError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
    };

    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
