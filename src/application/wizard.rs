//! WizardController - sequences schema load, answer collection, auto-fill
//! and prompt generation.
//!
//! The controller is the single owner of wizard state. Commands take `&self`,
//! so a UI can keep editing answers while a long auto-fill run is in flight
//! on the same controller. State sits behind one mutex that is never held
//! across an `.await`; every change between two remote calls is applied and
//! published in one critical section.
//!
//! Observers call [`WizardController::subscribe`] and receive a fresh
//! [`WizardSnapshot`] after every mutation.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::wizard::{
    dispatch_input, missing_required, AnswerInput, AnswerStore, AnswerValue, AutoFillPhase,
    AutoFillRun, AutoFillStatus, AutoFillStep, MergeOutcome, QuestionSchema, WizardError,
};
use crate::domain::foundation::{RunId, StateMachine};
use crate::ports::{AnswerSuggester, PromptGenerator, QuestionGenerator};

/// Everything a UI needs to render the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WizardSnapshot {
    pub idea: String,
    pub schema: QuestionSchema,
    pub answers: AnswerStore,
    pub missing_required: BTreeSet<String>,
    pub auto_fill: AutoFillStatus,
    pub last_error: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Default)]
struct WizardState {
    idea: String,
    schema: QuestionSchema,
    answers: AnswerStore,
    auto_fill: AutoFillStatus,
    last_error: Option<String>,
    prompt: Option<String>,
    /// Bumped when a load starts and when a schema is replaced; runs and
    /// prompts from an older epoch are dropped.
    epoch: u64,
    /// Bumped when a load starts; only the latest load may install its schema.
    load_seq: u64,
}

impl WizardState {
    fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            idea: self.idea.clone(),
            schema: self.schema.clone(),
            answers: self.answers.clone(),
            missing_required: missing_required(&self.schema, &self.answers),
            auto_fill: self.auto_fill,
            last_error: self.last_error.clone(),
            prompt: self.prompt.clone(),
        }
    }
}

/// Wizard glue between the UI and the collaborator ports.
pub struct WizardController {
    questions: Arc<dyn QuestionGenerator>,
    suggester: Arc<dyn AnswerSuggester>,
    prompts: Arc<dyn PromptGenerator>,
    state: Mutex<WizardState>,
    updates: watch::Sender<WizardSnapshot>,
}

impl WizardController {
    pub fn new(
        questions: Arc<dyn QuestionGenerator>,
        suggester: Arc<dyn AnswerSuggester>,
        prompts: Arc<dyn PromptGenerator>,
    ) -> Self {
        let (updates, _) = watch::channel(WizardSnapshot::default());
        Self {
            questions,
            suggester,
            prompts,
            state: Mutex::new(WizardState::default()),
            updates,
        }
    }

    /// Builds a controller from one adapter that implements every port.
    pub fn with_services<S>(services: Arc<S>) -> Self
    where
        S: QuestionGenerator + AnswerSuggester + PromptGenerator + 'static,
    {
        Self::new(services.clone(), services.clone(), services)
    }

    // ─────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────

    /// Fetches the question schema for `idea`, replacing all prior state.
    ///
    /// A blank idea is a no-op. Starting a load cancels any in-flight run or
    /// prompt; the previous idea, schema and answers stay until the new schema
    /// arrives, and survive a failed fetch.
    pub async fn load_schema(&self, idea: &str) -> Result<(), WizardError> {
        let idea = idea.trim();
        if idea.is_empty() {
            debug!("Ignoring schema load for blank idea");
            return Ok(());
        }

        let (epoch, load) = {
            let mut state = self.state();
            state.epoch += 1;
            state.load_seq += 1;
            if let Ok(phase) = state.auto_fill.phase.transition_to(AutoFillPhase::Aborted) {
                state.auto_fill.phase = phase;
            }
            state.last_error = None;
            self.publish(&state);
            (state.epoch, state.load_seq)
        };

        info!(epoch, "Loading question schema");
        let result = self.questions.generate_questions(idea).await;

        let mut state = self.state();
        if state.load_seq != load {
            debug!(epoch, "Discarding superseded question schema");
            return Ok(());
        }

        match result {
            Ok(questions) => {
                let schema = QuestionSchema::new(questions);
                for issue in schema.lint() {
                    warn!(%issue, "Tolerating malformed question schema");
                }
                state.epoch += 1;
                state.idea = idea.to_string();
                state.answers = AnswerStore::for_schema(&schema);
                state.schema = schema;
                state.auto_fill = AutoFillStatus::default();
                state.prompt = None;
                info!(epoch, questions = state.schema.len(), "Question schema loaded");
                self.publish(&state);
                Ok(())
            }
            Err(source) => Err(self.fail(&mut state, WizardError::SchemaLoad(source))),
        }
    }

    /// Overwrites an answer without type checks.
    pub fn set_answer(&self, id: &str, value: AnswerValue) {
        let mut state = self.state();
        state.answers.set_answer(id, value);
        self.publish(&state);
    }

    /// Applies raw UI input through the question's type dispatch.
    pub fn edit_answer(&self, id: &str, input: AnswerInput) -> Result<(), WizardError> {
        let mut state = self.state();
        let Some(question) = state.schema.get(id).cloned() else {
            let error = WizardError::invalid_answer(id, "no such question");
            return Err(self.fail(&mut state, error));
        };

        match dispatch_input(&question, input) {
            Ok(edit) => {
                state.answers.apply(id, edit);
                self.publish(&state);
                Ok(())
            }
            Err(error) => Err(self.fail(&mut state, error)),
        }
    }

    /// Toggles one option of a multi-select answer.
    pub fn toggle_choice(&self, id: &str, choice: &str) {
        let mut state = self.state();
        state.answers.toggle_choice(id, choice);
        self.publish(&state);
    }

    /// Runs auto-fill over the current schema, one question at a time.
    ///
    /// No-op while another run is in flight, or when there is no idea or no
    /// schema. Stops at the first failed suggestion, keeping earlier merges.
    /// A schema load during the run ends it quietly, and a dropped call marks
    /// the run aborted so a later start is not blocked.
    pub async fn start_auto_fill(&self) -> Result<AutoFillStatus, WizardError> {
        let (mut run, epoch) = {
            let mut state = self.state();
            if state.auto_fill.phase.is_running() {
                debug!("Auto-fill already running");
                return Ok(state.auto_fill);
            }
            let Some(run) = AutoFillRun::start(&state.idea, &state.schema, &state.answers) else {
                debug!("Nothing to auto-fill");
                return Ok(state.auto_fill);
            };
            state.auto_fill = run.status();
            state.last_error = None;
            self.publish(&state);
            (run, state.epoch)
        };

        let run_id = run.run_id();
        let _cancel = RunCancelGuard {
            controller: self,
            epoch,
            run_id,
        };
        info!(%run_id, total = run.progress().total, "Auto-fill started");

        loop {
            let request = {
                let mut state = self.state();
                if state.epoch != epoch {
                    debug!(%run_id, "Schema replaced, dropping auto-fill run");
                    return Ok(run.status());
                }

                match run.advance() {
                    AutoFillStep::Skipped { question_id } => {
                        debug!(%run_id, %question_id, "Already answered, skipping");
                        state.auto_fill = run.status();
                        self.publish(&state);
                        continue;
                    }
                    AutoFillStep::Finished => {
                        state.auto_fill = run.status();
                        self.publish(&state);
                        info!(%run_id, done = run.progress().done, "Auto-fill completed");
                        return Ok(run.status());
                    }
                    AutoFillStep::Suggest(request) => request,
                }
            };

            let question_id = request.question.id.clone();
            let result = self.suggester.suggest_answer(request).await;

            let mut state = self.state();
            if state.epoch != epoch {
                debug!(%run_id, "Schema replaced, dropping auto-fill run");
                return Ok(run.status());
            }

            match result {
                Ok(suggestion) => {
                    if run.record_suggestion(suggestion, &mut state.answers)
                        == MergeOutcome::KeptUserAnswer
                    {
                        debug!(%run_id, %question_id, "Kept answer edited during suggestion");
                    }
                    state.auto_fill = run.status();
                    self.publish(&state);
                }
                Err(source) => {
                    run.record_failure();
                    state.auto_fill = run.status();
                    let error = WizardError::Suggestion {
                        question_id,
                        source,
                    };
                    return Err(self.fail(&mut state, error));
                }
            }
        }
    }

    /// Validates required answers, then asks for the final prompt.
    pub async fn generate_prompt(&self) -> Result<String, WizardError> {
        let (idea, answers, epoch) = {
            let mut state = self.state();
            if state.idea.trim().is_empty() {
                return Err(self.fail(&mut state, WizardError::EmptyIdea));
            }
            let missing = missing_required(&state.schema, &state.answers);
            if !missing.is_empty() {
                let error = WizardError::MissingRequiredAnswers(missing.into_iter().collect());
                return Err(self.fail(&mut state, error));
            }
            state.last_error = None;
            self.publish(&state);
            (state.idea.clone(), state.answers.cleaned_view(), state.epoch)
        };

        info!(answers = answers.len(), "Generating prompt");
        let result = self.prompts.generate_prompt(&idea, &answers).await;

        let mut state = self.state();
        if state.epoch != epoch {
            debug!("Schema replaced, not storing generated prompt");
            return result.map_err(WizardError::PromptGeneration);
        }

        match result {
            Ok(prompt) => {
                state.prompt = Some(prompt.clone());
                self.publish(&state);
                Ok(prompt)
            }
            Err(source) => Err(self.fail(&mut state, WizardError::PromptGeneration(source))),
        }
    }

    pub fn clear_prompt(&self) {
        let mut state = self.state();
        state.prompt = None;
        self.publish(&state);
    }

    // ─────────────────────────────────────────────────────────────────
    // Observable state
    // ─────────────────────────────────────────────────────────────────

    /// Receives a snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<WizardSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        self.state().snapshot()
    }

    pub fn schema(&self) -> QuestionSchema {
        self.state().schema.clone()
    }

    pub fn answers(&self) -> AnswerStore {
        self.state().answers.clone()
    }

    pub fn missing_required(&self) -> BTreeSet<String> {
        let state = self.state();
        missing_required(&state.schema, &state.answers)
    }

    pub fn auto_fill_status(&self) -> AutoFillStatus {
        self.state().auto_fill
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn prompt(&self) -> Option<String> {
        self.state().prompt.clone()
    }

    // ─────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &WizardState) {
        self.updates.send_replace(state.snapshot());
    }

    /// Records `error` in the last-error slot and hands it back for returning.
    fn fail(&self, state: &mut WizardState, error: WizardError) -> WizardError {
        if error.is_remote() {
            warn!(code = %error.code(), %error, "Wizard operation failed");
        } else {
            debug!(code = %error.code(), %error, "Wizard input rejected");
        }
        state.last_error = Some(error.to_string());
        self.publish(state);
        error
    }
}

/// Marks a run aborted when its future is dropped before the run ends.
///
/// Without this a cancelled caller would leave the stored phase at `Running`
/// and every later start would be a no-op.
struct RunCancelGuard<'a> {
    controller: &'a WizardController,
    epoch: u64,
    run_id: RunId,
}

impl Drop for RunCancelGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.controller.state();
        if state.epoch != self.epoch || state.auto_fill.run_id != Some(self.run_id) {
            return;
        }
        // Only `Running` may move to `Aborted`; finished runs are left alone.
        if let Ok(phase) = state.auto_fill.phase.transition_to(AutoFillPhase::Aborted) {
            debug!(run_id = %self.run_id, "Auto-fill cancelled by caller");
            state.auto_fill.phase = phase;
            self.controller.publish(&state);
        }
    }
}
