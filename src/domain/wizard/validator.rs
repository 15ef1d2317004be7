//! Required-field validation.

use std::collections::BTreeSet;

use super::answer::AnswerValue;
use super::answer_store::AnswerStore;
use super::question::{Question, QuestionSchema, QuestionType};

/// Ids of required questions whose answers fail their type's requiredness rule.
pub fn missing_required(schema: &QuestionSchema, store: &AnswerStore) -> BTreeSet<String> {
    schema
        .iter()
        .filter(|q| q.required && is_missing(q, store.get(&q.id)))
        .map(|q| q.id.clone())
        .collect()
}

/// Requiredness rule for a single question, ignoring its `required` flag.
///
/// Booleans always have a definite value once rendered, so they are never missing.
pub fn is_missing(question: &Question, value: Option<&AnswerValue>) -> bool {
    match question.question_type {
        QuestionType::Boolean => false,
        QuestionType::MultiSelect => !matches!(value, Some(AnswerValue::Choices(c)) if !c.is_empty()),
        _ => value.map_or(true, AnswerValue::is_blank),
    }
}
