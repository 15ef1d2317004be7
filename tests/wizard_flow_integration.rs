//! Integration tests for the wizard workflow.
//!
//! Drive `WizardController` end to end through `MockWizardServices`:
//! schema load, manual edits, auto-fill (including edits racing an in-flight
//! suggestion), and prompt generation.

use std::collections::BTreeSet;
use std::sync::Arc;

use prompt_wizard::adapters::wizard_services::{MockWizardServices, SuggestionGate};
use prompt_wizard::application::WizardController;
use prompt_wizard::domain::wizard::{
    AnswerInput, AnswerValue, AutoFillPhase, AutoFillProgress, Question, QuestionType, WizardError,
};
use prompt_wizard::ports::ServiceError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_questions() -> Vec<Question> {
    vec![
        Question::new("who", QuestionType::Text, "Who is the target user?").required(),
        Question::new("platform", QuestionType::SingleSelect, "Which platform?")
            .required()
            .with_choices(["Web", "iOS", "Android"]),
        Question::new("features", QuestionType::MultiSelect, "Core features?")
            .with_choices(["Auth", "Payments", "Offline"]),
    ]
}

fn wizard_with(services: &MockWizardServices) -> Arc<WizardController> {
    Arc::new(WizardController::with_services(Arc::new(services.clone())))
}

// =============================================================================
// Auto-fill
// =============================================================================

#[tokio::test]
async fn later_suggestions_see_earlier_merges() {
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_suggestion("Home cooks")
        .with_suggestion("iOS");
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    wizard.start_auto_fill().await.unwrap();

    let calls = services.suggestion_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].current_answers.is_empty());
    assert_eq!(
        calls[1].current_answers.get("who"),
        Some(&AnswerValue::text("Home cooks"))
    );
    assert_eq!(
        calls[2].current_answers.get("platform"),
        Some(&AnswerValue::text("iOS"))
    );
    assert!(calls.iter().all(|c| c.idea == "Recipe sharing app"));
}

#[tokio::test]
async fn answered_questions_are_skipped() {
    let services = MockWizardServices::new().with_questions(app_questions());
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();
    wizard
        .edit_answer("platform", AnswerInput::Choice("Android".into()))
        .unwrap();

    let status = wizard.start_auto_fill().await.unwrap();

    assert_eq!(status.progress, AutoFillProgress { done: 3, total: 3 });
    let asked: Vec<String> = services
        .suggestion_calls()
        .into_iter()
        .map(|c| c.question.id)
        .collect();
    assert_eq!(asked, vec!["who", "features"]);
    assert_eq!(
        wizard.answers().get("platform"),
        Some(&AnswerValue::text("Android"))
    );
}

#[tokio::test]
async fn progress_advances_one_question_at_a_time() {
    let gate = SuggestionGate::new();
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_suggestion_gate(gate.clone());
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    let run = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.start_auto_fill().await }
    });

    for done in 0..3 {
        gate.started.notified().await;
        let status = wizard.auto_fill_status();
        assert_eq!(status.phase, AutoFillPhase::Running);
        assert_eq!(status.progress, AutoFillProgress { done, total: 3 });
        gate.release.notify_one();
    }

    let status = run.await.unwrap().unwrap();
    assert_eq!(status.phase, AutoFillPhase::Completed);
    assert_eq!(status.progress, AutoFillProgress { done: 3, total: 3 });
}

#[tokio::test]
async fn second_start_while_running_is_ignored() {
    let gate = SuggestionGate::new();
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_suggestion_gate(gate.clone());
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    let run = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.start_auto_fill().await }
    });
    gate.started.notified().await;

    let second = wizard.start_auto_fill().await.unwrap();
    assert_eq!(second.phase, AutoFillPhase::Running);
    assert_eq!(second.run_id, wizard.auto_fill_status().run_id);

    gate.release.notify_one();
    for _ in 1..3 {
        gate.started.notified().await;
        gate.release.notify_one();
    }
    run.await.unwrap().unwrap();
    assert_eq!(services.suggestion_calls().len(), 3);
}

#[tokio::test]
async fn failure_halts_and_keeps_earlier_merges() {
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_suggestion("Home cooks")
        .with_suggestion("Web")
        .with_suggestion_error(ServiceError::Timeout { timeout_secs: 120 });
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    let err = wizard.start_auto_fill().await.unwrap_err();

    assert!(matches!(
        err,
        WizardError::Suggestion { ref question_id, .. } if question_id == "features"
    ));
    let status = wizard.auto_fill_status();
    assert_eq!(status.phase, AutoFillPhase::Aborted);
    assert_eq!(status.progress, AutoFillProgress { done: 2, total: 3 });

    let answers = wizard.answers();
    assert_eq!(answers.get("who"), Some(&AnswerValue::text("Home cooks")));
    assert_eq!(answers.get("platform"), Some(&AnswerValue::text("Web")));
    assert_eq!(answers.get("features"), Some(&AnswerValue::Choices(vec![])));
    assert!(wizard.last_error().unwrap().contains("features"));
}

#[tokio::test]
async fn restart_after_failure_resumes_at_unanswered_questions() {
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_suggestion("Home cooks")
        .with_suggestion_error(ServiceError::unavailable("busy"));
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();
    assert!(wizard.start_auto_fill().await.is_err());

    let status = wizard.start_auto_fill().await.unwrap();

    assert_eq!(status.phase, AutoFillPhase::Completed);
    assert_eq!(wizard.last_error(), None);
    let asked: Vec<String> = services
        .suggestion_calls()
        .into_iter()
        .map(|c| c.question.id)
        .collect();
    assert_eq!(asked, vec!["who", "platform", "platform", "features"]);
}

#[tokio::test]
async fn user_edit_during_suggestion_is_preserved() {
    let gate = SuggestionGate::new();
    let services = MockWizardServices::new()
        .with_questions(vec![
            Question::new("who", QuestionType::Text, "Who?").required()
        ])
        .with_suggestion("Suggested users")
        .with_suggestion_gate(gate.clone());
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    let run = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.start_auto_fill().await }
    });
    gate.started.notified().await;
    wizard.set_answer("who", AnswerValue::text("My own answer"));
    gate.release.notify_one();

    let status = run.await.unwrap().unwrap();

    assert_eq!(status.phase, AutoFillPhase::Completed);
    assert_eq!(
        wizard.answers().get("who"),
        Some(&AnswerValue::text("My own answer"))
    );
}

#[tokio::test]
async fn reloading_schema_stops_the_run() {
    let gate = SuggestionGate::new();
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_questions(vec![
            Question::new("who", QuestionType::Text, "Who now?").required(),
            Question::new("budget", QuestionType::Number, "Budget?"),
        ])
        .with_suggestion("Stale suggestion")
        .with_suggestion_gate(gate.clone());
    let wizard = wizard_with(&services);
    wizard.load_schema("First idea").await.unwrap();

    let run = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.start_auto_fill().await }
    });
    gate.started.notified().await;
    wizard.load_schema("Second idea").await.unwrap();
    gate.release.notify_one();
    run.await.unwrap().unwrap();

    assert_eq!(services.suggestion_calls().len(), 1);
    assert_eq!(wizard.auto_fill_status().phase, AutoFillPhase::Idle);
    let answers = wizard.answers();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get("who"), Some(&AnswerValue::empty_text()));
    assert_eq!(answers.get("platform"), None);
}

// =============================================================================
// Validation and prompt generation
// =============================================================================

#[tokio::test]
async fn boolean_only_schema_never_blocks_prompt() {
    let services = MockWizardServices::new().with_questions(vec![
        Question::new("offline", QuestionType::Boolean, "Offline first?").required(),
        Question::new("dark", QuestionType::Boolean, "Dark mode?").required(),
    ]);
    let wizard = wizard_with(&services);
    wizard.load_schema("Notes app").await.unwrap();

    assert!(wizard.missing_required().is_empty());
    wizard.set_answer("offline", AnswerValue::Bool(false));
    assert!(wizard.missing_required().is_empty());

    wizard.generate_prompt().await.unwrap();
    let (_, answers) = &services.prompt_calls()[0];
    assert_eq!(answers.get("offline"), Some(&AnswerValue::Bool(false)));
    assert!(!answers.contains_key("dark"));
}

#[tokio::test]
async fn required_multi_select_needs_a_choice() {
    let services = MockWizardServices::new().with_questions(vec![Question::new(
        "q1",
        QuestionType::MultiSelect,
        "Pick some",
    )
    .required()
    .with_choices(["a", "b"])]);
    let wizard = wizard_with(&services);
    wizard.load_schema("Idea").await.unwrap();

    assert_eq!(wizard.missing_required(), BTreeSet::from(["q1".to_string()]));

    wizard.toggle_choice("q1", "a");
    assert!(wizard.missing_required().is_empty());

    wizard.toggle_choice("q1", "a");
    assert_eq!(wizard.answers().get("q1"), Some(&AnswerValue::Choices(vec![])));
    assert_eq!(wizard.missing_required(), BTreeSet::from(["q1".to_string()]));
}

#[tokio::test]
async fn full_flow_produces_prompt_from_cleaned_answers() {
    let services = MockWizardServices::new()
        .with_questions(app_questions())
        .with_prompt("Build a recipe app for home cooks");
    let wizard = wizard_with(&services);

    let err = wizard.generate_prompt().await.unwrap_err();
    assert_eq!(err, WizardError::EmptyIdea);

    wizard.load_schema("Recipe sharing app").await.unwrap();
    wizard
        .edit_answer("who", AnswerInput::Text("Home cooks".into()))
        .unwrap();
    wizard
        .edit_answer("platform", AnswerInput::Choice("Web".into()))
        .unwrap();

    let prompt = wizard.generate_prompt().await.unwrap();

    assert_eq!(prompt, "Build a recipe app for home cooks");
    assert_eq!(wizard.snapshot().prompt.as_deref(), Some(prompt.as_str()));
    let (idea, answers) = &services.prompt_calls()[0];
    assert_eq!(idea, "Recipe sharing app");
    assert_eq!(answers.keys().collect::<Vec<_>>(), vec!["platform", "who"]);
}

#[tokio::test]
async fn invalid_choice_is_rejected_without_changing_answers() {
    let services = MockWizardServices::new().with_questions(app_questions());
    let wizard = wizard_with(&services);
    wizard.load_schema("Recipe sharing app").await.unwrap();

    let err = wizard
        .edit_answer("platform", AnswerInput::Choice("Smart fridge".into()))
        .unwrap_err();

    assert!(matches!(err, WizardError::InvalidAnswer { .. }));
    assert_eq!(
        wizard.answers().get("platform"),
        Some(&AnswerValue::empty_text())
    );
}
