//! Auto-Fill - sequential, cumulative answer suggestion.
//!
//! [`AutoFillRun`] is a pure state machine. The caller steps it with
//! [`AutoFillRun::advance`], performs the suggestion call for every
//! [`AutoFillStep::Suggest`] it hands out, and feeds the outcome back through
//! [`AutoFillRun::record_suggestion`] or [`AutoFillRun::record_failure`].
//! Nothing here awaits, so the points where user edits can interleave with a
//! run are exactly the gaps between those calls.
//!
//! Each request carries the cleaned answers decided so far, so question
//! `i + 1` is always suggested with the result of question `i` in hand.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{RunId, StateMachine};

use super::answer::AnswerValue;
use super::answer_store::{AnswerStore, CleanedAnswers};
use super::question::{Question, QuestionSchema, QuestionType};

/// Lifecycle of an auto-fill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoFillPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Aborted,
}

impl AutoFillPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, AutoFillPhase::Running)
    }
}

impl StateMachine for AutoFillPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AutoFillPhase::*;
        matches!(
            (self, target),
            (Idle, Running)
                | (Running, Completed)
                | (Running, Aborted)
                | (Completed, Running)
                | (Aborted, Running)
        )
    }
}

impl fmt::Display for AutoFillPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AutoFillPhase::Idle => "Idle",
            AutoFillPhase::Running => "Running",
            AutoFillPhase::Completed => "Completed",
            AutoFillPhase::Aborted => "Aborted",
        };
        write!(f, "{}", s)
    }
}

/// How far a run has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutoFillProgress {
    pub done: usize,
    pub total: usize,
}

impl AutoFillProgress {
    pub fn new(total: usize) -> Self {
        Self { done: 0, total }
    }
}

/// Phase and progress of the most recent run, as shown to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AutoFillStatus {
    pub phase: AutoFillPhase,
    pub progress: AutoFillProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
}

/// What the suggestion collaborator receives for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub idea: String,
    pub question: Question,
    pub current_answers: CleanedAnswers,
}

/// What the suggestion collaborator returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub value: AnswerValue,
}

impl Suggestion {
    pub fn new(id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// The next thing the caller has to do.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoFillStep {
    /// The question was already answered; progress moved on.
    Skipped { question_id: String },
    /// Ask the collaborator, then report back.
    Suggest(SuggestionRequest),
    /// Every question has been processed.
    Finished,
}

/// Result of merging a suggestion into the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The suggestion was written.
    Filled,
    /// The user answered while the call was in flight; their answer stays.
    KeptUserAnswer,
}

/// "Already answered" as auto-fill sees it.
///
/// Booleans never count as answered, so auto-fill always overwrites them.
/// `None` stands for an id the schema does not know, judged like a scalar.
pub fn is_answered(question_type: Option<&QuestionType>, value: Option<&AnswerValue>) -> bool {
    match question_type {
        Some(QuestionType::Boolean) => false,
        _ => value.is_some_and(|v| !v.is_empty()),
    }
}

/// One pass over a schema.
#[derive(Debug, Clone)]
pub struct AutoFillRun {
    run_id: RunId,
    idea: String,
    questions: Vec<Question>,
    working: AnswerStore,
    cursor: usize,
    awaiting: bool,
    progress: AutoFillProgress,
    phase: AutoFillPhase,
}

impl AutoFillRun {
    /// Starts a run over `schema`, working on a private copy of `answers`.
    ///
    /// Returns `None` when there is nothing to do: a blank idea or an empty schema.
    pub fn start(idea: &str, schema: &QuestionSchema, answers: &AnswerStore) -> Option<Self> {
        if idea.trim().is_empty() || schema.is_empty() {
            return None;
        }

        let mut run = Self {
            run_id: RunId::new(),
            idea: idea.to_string(),
            questions: schema.questions().to_vec(),
            working: answers.clone(),
            cursor: 0,
            awaiting: false,
            progress: AutoFillProgress::new(schema.len()),
            phase: AutoFillPhase::Idle,
        };
        run.enter(AutoFillPhase::Running);
        Some(run)
    }

    /// Moves to the next question.
    ///
    /// While a suggestion is outstanding this hands out the same request again.
    /// Once the run has ended it always returns [`AutoFillStep::Finished`].
    pub fn advance(&mut self) -> AutoFillStep {
        if !self.phase.is_running() {
            return AutoFillStep::Finished;
        }

        let Some(question) = self.questions.get(self.cursor) else {
            self.enter(AutoFillPhase::Completed);
            return AutoFillStep::Finished;
        };

        if !self.awaiting
            && is_answered(Some(&question.question_type), self.working.get(&question.id))
        {
            let question_id = question.id.clone();
            self.step_forward();
            return AutoFillStep::Skipped { question_id };
        }

        self.awaiting = true;
        AutoFillStep::Suggest(SuggestionRequest {
            idea: self.idea.clone(),
            question: question.clone(),
            current_answers: self.working.cleaned_view(),
        })
    }

    /// Merges a successful suggestion into the working copy and `live`.
    ///
    /// `live` is re-checked first: if the user answered the question while the
    /// call was in flight, their answer is kept and copied into the working copy.
    pub fn record_suggestion(&mut self, suggestion: Suggestion, live: &mut AnswerStore) -> MergeOutcome {
        let question_type = self
            .questions
            .iter()
            .find(|q| q.id == suggestion.id)
            .map(|q| &q.question_type);

        let outcome = match live.get(&suggestion.id) {
            Some(current) if is_answered(question_type, Some(current)) => {
                self.working.set_answer(suggestion.id, current.clone());
                MergeOutcome::KeptUserAnswer
            }
            _ => {
                live.set_answer(suggestion.id.clone(), suggestion.value.clone());
                self.working.set_answer(suggestion.id, suggestion.value);
                MergeOutcome::Filled
            }
        };

        self.step_forward();
        outcome
    }

    /// Stops the run after a failed suggestion; the failing question is not counted.
    pub fn record_failure(&mut self) {
        self.awaiting = false;
        if self.phase.is_running() {
            self.enter(AutoFillPhase::Aborted);
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn phase(&self) -> AutoFillPhase {
        self.phase
    }

    pub fn progress(&self) -> AutoFillProgress {
        self.progress
    }

    pub fn status(&self) -> AutoFillStatus {
        AutoFillStatus {
            phase: self.phase,
            progress: self.progress,
            run_id: Some(self.run_id),
        }
    }

    /// Id of the question whose suggestion is outstanding, if any.
    pub fn awaiting_question(&self) -> Option<&str> {
        if self.awaiting {
            self.questions.get(self.cursor).map(|q| q.id.as_str())
        } else {
            None
        }
    }

    /// The run's private view of the answers.
    pub fn working_answers(&self) -> &AnswerStore {
        &self.working
    }

    fn step_forward(&mut self) {
        self.awaiting = false;
        self.cursor += 1;
        self.progress.done += 1;
    }

    fn enter(&mut self, next: AutoFillPhase) {
        match self.phase.transition_to(next) {
            Ok(phase) => self.phase = phase,
            Err(err) => tracing::warn!(run_id = %self.run_id, %err, "Ignoring auto-fill phase change"),
        }
    }
}
