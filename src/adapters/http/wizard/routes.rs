//! Axum router configuration for the wizard service endpoints.

use axum::{routing::post, Router};

use super::handlers::{generate_prompt, generate_questions, suggest_answer, WizardApiState};

/// Create the wizard API routes.
///
/// # Routes
///
/// - `POST /generate-questions` - Idea to question schema
/// - `POST /suggest-answer` - Suggestion for one question
/// - `POST /generate-prompt` - Idea and answers to final prompt
pub fn wizard_routes() -> Router<WizardApiState> {
    Router::new()
        .route("/generate-questions", post(generate_questions))
        .route("/suggest-answer", post(suggest_answer))
        .route("/generate-prompt", post(generate_prompt))
}

/// Create the complete wizard router with state applied.
///
/// # Example
///
/// ```ignore
/// let state = WizardApiState::from_services(Arc::new(TemplateWizardServices::new()));
/// let app = wizard_router(state).layer(TraceLayer::new_for_http());
/// ```
pub fn wizard_router(state: WizardApiState) -> Router {
    wizard_routes().with_state(state)
}
