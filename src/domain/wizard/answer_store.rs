//! Answer Store - the mutable question id → answer mapping.
//!
//! Entries keep insertion order, which after [`AnswerStore::initialize`] is
//! schema order. Keys are only added or overwritten; the store is replaced
//! wholesale when a new schema arrives.
//!
//! Each mutation bumps [`AnswerStore::revision`]; the wizard controller
//! publishes a snapshot to observers right after every mutating call.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::answer::{AnswerEdit, AnswerValue};
use super::question::QuestionSchema;

/// The submission view: answers with every empty sentinel removed.
pub type CleanedAnswers = BTreeMap<String, AnswerValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    entries: Vec<(String, AnswerValue)>,
    revision: u64,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store seeded with one empty-sentinel entry per question.
    pub fn for_schema(schema: &QuestionSchema) -> Self {
        let mut store = Self::new();
        store.initialize(schema);
        store
    }

    /// Replaces every entry with the schema's empty sentinels, in schema order.
    ///
    /// Duplicate ids keep a single slot typed by their first occurrence.
    pub fn initialize(&mut self, schema: &QuestionSchema) {
        self.entries.clear();
        for question in schema.iter() {
            if self.position(&question.id).is_none() {
                self.entries
                    .push((question.id.clone(), question.empty_answer()));
            }
        }
        self.revision += 1;
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.position(id).map(|i| &self.entries[i].1)
    }

    /// Overwrites the answer for `id`, adding a slot for unknown ids.
    pub fn set_answer(&mut self, id: impl Into<String>, value: AnswerValue) {
        let id = id.into();
        match self.position(&id) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((id, value)),
        }
        self.revision += 1;
    }

    /// Adds `choice` if absent, removes it if present.
    ///
    /// A non-collection current value is treated as an empty selection.
    pub fn toggle_choice(&mut self, id: &str, choice: &str) {
        let mut selected = match self.get(id) {
            Some(AnswerValue::Choices(current)) => current.clone(),
            _ => Vec::new(),
        };

        if let Some(i) = selected.iter().position(|c| c == choice) {
            selected.remove(i);
        } else {
            selected.push(choice.to_string());
        }

        self.set_answer(id, AnswerValue::Choices(selected));
    }

    /// Applies a dispatched edit.
    pub fn apply(&mut self, id: &str, edit: AnswerEdit) {
        match edit {
            AnswerEdit::Replace(value) => self.set_answer(id, value),
            AnswerEdit::Toggle(choice) => self.toggle_choice(id, &choice),
        }
    }

    /// Projection without empty sentinels; safe to send to collaborators.
    pub fn cleaned_view(&self) -> CleanedAnswers {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutation counter; changes after every write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| entry_id == id)
    }
}

impl Serialize for AnswerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}
