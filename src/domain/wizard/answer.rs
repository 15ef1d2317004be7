//! Answer values and the type-aware input dispatch.
//!
//! An answer's domain depends on the owning question's type. The UI hands raw
//! input to [`dispatch_input`], which turns it into an [`AnswerEdit`] the
//! answer store can apply, or rejects it.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::errors::WizardError;
use super::question::{Question, QuestionType};

/// A stored answer.
///
/// Serializes to plain JSON: `null`, `true`, `3`, `"text"` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// The empty string sentinel used by scalar questions.
    pub fn empty_text() -> Self {
        AnswerValue::Text(String::new())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Returns true if this value is an empty sentinel of any question type.
    ///
    /// Whitespace is content here; only the validator trims.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::Choices(c) => c.is_empty(),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => false,
        }
    }

    /// Returns true if the value is null or renders to whitespace only.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            other => other.to_display_string().trim().is_empty(),
        }
    }

    /// String form used for requiredness checks and prompt rendering.
    pub fn to_display_string(&self) -> String {
        match self {
            AnswerValue::Null => String::new(),
            AnswerValue::Bool(b) => b.to_string(),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Choices(c) => c.join(","),
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(c) => Some(c),
            _ => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::text(value)
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value.into())
    }
}

/// Raw input coming from an input control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    /// Free text from a text box, text area, number field or select.
    Text(String),
    /// A single option picked (select) or clicked (multi-select checkbox).
    Choice(String),
    /// A checkbox or yes/no switch.
    Flag(bool),
}

/// The edit an input resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerEdit {
    Replace(AnswerValue),
    Toggle(String),
}

/// Maps an input for `question` to the edit its type accepts.
pub fn dispatch_input(question: &Question, input: AnswerInput) -> Result<AnswerEdit, WizardError> {
    match (&question.question_type, input) {
        (QuestionType::Unsupported(tag), _) => Err(WizardError::UnsupportedQuestionType {
            question_id: question.id.clone(),
            type_tag: tag.clone(),
        }),
        (QuestionType::Text | QuestionType::Textarea, AnswerInput::Text(raw)) => {
            Ok(AnswerEdit::Replace(AnswerValue::Text(raw)))
        }
        (QuestionType::Number, AnswerInput::Text(raw)) => parse_number(question, &raw)
            .map(AnswerEdit::Replace),
        (QuestionType::SingleSelect, AnswerInput::Text(choice) | AnswerInput::Choice(choice)) => {
            if !choice.is_empty() {
                check_choice(question, &choice)?;
            }
            Ok(AnswerEdit::Replace(AnswerValue::Text(choice)))
        }
        (QuestionType::MultiSelect, AnswerInput::Choice(choice)) => {
            check_choice(question, &choice)?;
            Ok(AnswerEdit::Toggle(choice))
        }
        (QuestionType::Boolean, AnswerInput::Flag(flag)) => {
            Ok(AnswerEdit::Replace(AnswerValue::Bool(flag)))
        }
        (question_type, input) => Err(WizardError::invalid_answer(
            &question.id,
            format!("{} question cannot take {:?}", question_type, input),
        )),
    }
}

fn parse_number(question: &Question, raw: &str) -> Result<AnswerValue, WizardError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(AnswerValue::empty_text());
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(AnswerValue::Number(int.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(AnswerValue::Number)
        .ok_or_else(|| WizardError::invalid_answer(&question.id, format!("'{}' is not a number", raw)))
}

fn check_choice(question: &Question, choice: &str) -> Result<(), WizardError> {
    let choices = question.choices();
    // A select without choices is a malformed schema we tolerate.
    if choices.is_empty() || choices.iter().any(|c| c == choice) {
        Ok(())
    } else {
        Err(WizardError::invalid_answer(
            &question.id,
            format!("'{}' is not one of the offered choices", choice),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn platform() -> Question {
        Question::new("platform", QuestionType::SingleSelect, "Platform?")
            .with_choices(["Web", "iOS"])
    }

    fn features() -> Question {
        Question::new("features", QuestionType::MultiSelect, "Features?")
            .with_choices(["Auth", "Payments"])
    }

    #[test]
    fn answer_value_deserializes_plain_json() {
        let values: Vec<AnswerValue> =
            serde_json::from_value(json!([null, true, 3, 2.5, "hi", ["a", "b"]])).unwrap();

        assert_eq!(values[0], AnswerValue::Null);
        assert_eq!(values[1], AnswerValue::Bool(true));
        assert_eq!(values[2], AnswerValue::from(3));
        assert!(matches!(values[3], AnswerValue::Number(_)));
        assert_eq!(values[4], AnswerValue::text("hi"));
        assert_eq!(values[5], AnswerValue::choices(["a", "b"]));
    }

    #[test]
    fn answer_value_serializes_plain_json() {
        let value = serde_json::to_value(AnswerValue::choices(["a"])).unwrap();
        assert_eq!(value, json!(["a"]));
        assert_eq!(serde_json::to_value(AnswerValue::Null).unwrap(), json!(null));
    }

    #[test]
    fn emptiness_sentinels() {
        assert!(AnswerValue::Null.is_empty());
        assert!(AnswerValue::empty_text().is_empty());
        assert!(AnswerValue::Choices(vec![]).is_empty());
        assert!(!AnswerValue::Bool(false).is_empty());
        assert!(!AnswerValue::from(0).is_empty());
        assert!(!AnswerValue::text("  ").is_empty());
    }

    #[test]
    fn blank_trims_whitespace() {
        assert!(AnswerValue::text("  \t").is_blank());
        assert!(!AnswerValue::Bool(false).is_blank());
        assert!(!AnswerValue::from(0).is_blank());
        assert!(AnswerValue::Choices(vec![]).is_blank());
    }

    #[test]
    fn display_string_joins_choices() {
        assert_eq!(AnswerValue::choices(["a", "b"]).to_display_string(), "a,b");
        assert_eq!(AnswerValue::from(42).to_display_string(), "42");
    }

    #[test]
    fn text_input_replaces_text_answer() {
        let question = Question::new("who", QuestionType::Textarea, "Who?");
        let edit = dispatch_input(&question, AnswerInput::Text("Students".into())).unwrap();
        assert_eq!(edit, AnswerEdit::Replace(AnswerValue::text("Students")));
    }

    #[test]
    fn number_input_coerces_to_number() {
        let question = Question::new("users", QuestionType::Number, "How many?");

        assert_eq!(
            dispatch_input(&question, AnswerInput::Text(" 250 ".into())).unwrap(),
            AnswerEdit::Replace(AnswerValue::from(250))
        );
        assert!(matches!(
            dispatch_input(&question, AnswerInput::Text("1.5".into())).unwrap(),
            AnswerEdit::Replace(AnswerValue::Number(_))
        ));
    }

    #[test]
    fn empty_number_input_is_empty_sentinel() {
        let question = Question::new("users", QuestionType::Number, "How many?");
        assert_eq!(
            dispatch_input(&question, AnswerInput::Text("".into())).unwrap(),
            AnswerEdit::Replace(AnswerValue::empty_text())
        );
    }

    #[test]
    fn garbage_number_input_is_rejected() {
        let question = Question::new("users", QuestionType::Number, "How many?");
        let err = dispatch_input(&question, AnswerInput::Text("lots".into())).unwrap_err();
        assert!(matches!(err, WizardError::InvalidAnswer { .. }));

        let err = dispatch_input(&question, AnswerInput::Text("NaN".into())).unwrap_err();
        assert!(matches!(err, WizardError::InvalidAnswer { .. }));
    }

    #[test]
    fn single_select_accepts_offered_choice_or_clear() {
        assert_eq!(
            dispatch_input(&platform(), AnswerInput::Choice("iOS".into())).unwrap(),
            AnswerEdit::Replace(AnswerValue::text("iOS"))
        );
        assert_eq!(
            dispatch_input(&platform(), AnswerInput::Text("".into())).unwrap(),
            AnswerEdit::Replace(AnswerValue::empty_text())
        );
        assert!(dispatch_input(&platform(), AnswerInput::Choice("Mainframe".into())).is_err());
    }

    #[test]
    fn select_without_choices_is_tolerated() {
        let question = Question::new("p", QuestionType::SingleSelect, "P?");
        assert!(dispatch_input(&question, AnswerInput::Choice("anything".into())).is_ok());
    }

    #[test]
    fn multi_select_toggles() {
        assert_eq!(
            dispatch_input(&features(), AnswerInput::Choice("Auth".into())).unwrap(),
            AnswerEdit::Toggle("Auth".into())
        );
        assert!(dispatch_input(&features(), AnswerInput::Choice("Chat".into())).is_err());
    }

    #[test]
    fn boolean_takes_flags_only() {
        let question = Question::new("offline", QuestionType::Boolean, "Offline?");
        assert_eq!(
            dispatch_input(&question, AnswerInput::Flag(false)).unwrap(),
            AnswerEdit::Replace(AnswerValue::Bool(false))
        );
        assert!(dispatch_input(&question, AnswerInput::Text("yes".into())).is_err());
    }

    #[test]
    fn unsupported_type_is_reported() {
        let question = Question::new("c", QuestionType::from("color"), "Color?");
        let err = dispatch_input(&question, AnswerInput::Text("red".into())).unwrap_err();

        assert_eq!(
            err,
            WizardError::UnsupportedQuestionType {
                question_id: "c".into(),
                type_tag: "color".into()
            }
        );
    }
}
