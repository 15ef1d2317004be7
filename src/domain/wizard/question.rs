//! Question schema - the server-defined list of clarifying questions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::answer::AnswerValue;

/// Input type of a question.
///
/// Unknown tags are kept as [`QuestionType::Unsupported`] instead of failing
/// deserialization, so a single bad question never rejects the whole schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Text,
    Textarea,
    SingleSelect,
    MultiSelect,
    Boolean,
    Number,
    Unsupported(String),
}

impl QuestionType {
    /// Wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
            QuestionType::SingleSelect => "single_select",
            QuestionType::MultiSelect => "multi_select",
            QuestionType::Boolean => "boolean",
            QuestionType::Number => "number",
            QuestionType::Unsupported(tag) => tag,
        }
    }

    /// The value an unanswered question of this type holds.
    pub fn empty_answer(&self) -> AnswerValue {
        match self {
            QuestionType::Boolean => AnswerValue::Null,
            QuestionType::MultiSelect => AnswerValue::Choices(Vec::new()),
            _ => AnswerValue::empty_text(),
        }
    }

    /// Returns true for types whose answers come from `choices`.
    pub fn uses_choices(&self) -> bool {
        matches!(self, QuestionType::SingleSelect | QuestionType::MultiSelect)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, QuestionType::Unsupported(_))
    }
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => QuestionType::Text,
            "textarea" => QuestionType::Textarea,
            "single_select" => QuestionType::SingleSelect,
            "multi_select" => QuestionType::MultiSelect,
            "boolean" => QuestionType::Boolean,
            "number" => QuestionType::Number,
            _ => QuestionType::Unsupported(tag),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(tag: &str) -> Self {
        QuestionType::from(tag.to_string())
    }
}

impl From<QuestionType> for String {
    fn from(question_type: QuestionType) -> Self {
        question_type.as_str().to_string()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single clarifying question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl Question {
    /// Creates an optional question with no placeholder or choices.
    pub fn new(
        id: impl Into<String>,
        question_type: QuestionType,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question_type,
            question: question.into(),
            required: false,
            placeholder: None,
            choices: None,
        }
    }

    /// Marks the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the selectable choices.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Choices offered by this question; empty when none were provided.
    pub fn choices(&self) -> &[String] {
        self.choices.as_deref().unwrap_or(&[])
    }

    pub fn empty_answer(&self) -> AnswerValue {
        self.question_type.empty_answer()
    }
}

/// Non-fatal problems found in a schema.
///
/// These are reported, never raised: the wizard keeps working with what it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    DuplicateId { id: String },
    MissingChoices { id: String },
    UnsupportedType { id: String, type_tag: String },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::DuplicateId { id } => write!(f, "duplicate question id '{}'", id),
            SchemaIssue::MissingChoices { id } => {
                write!(f, "select question '{}' has no choices", id)
            }
            SchemaIssue::UnsupportedType { id, type_tag } => {
                write!(f, "question '{}' has unsupported type '{}'", id, type_tag)
            }
        }
    }
}

/// The ordered, immutable list of questions for one idea.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSchema {
    questions: Vec<Question>,
}

impl QuestionSchema {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Looks up a question by id (first match wins).
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Lists contract violations the wizard tolerates.
    pub fn lint(&self) -> Vec<SchemaIssue> {
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                issues.push(SchemaIssue::DuplicateId {
                    id: question.id.clone(),
                });
            }
            match &question.question_type {
                QuestionType::Unsupported(tag) => issues.push(SchemaIssue::UnsupportedType {
                    id: question.id.clone(),
                    type_tag: tag.clone(),
                }),
                t if t.uses_choices() && question.choices().is_empty() => {
                    issues.push(SchemaIssue::MissingChoices {
                        id: question.id.clone(),
                    })
                }
                _ => {}
            }
        }

        issues
    }
}

impl From<Vec<Question>> for QuestionSchema {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
