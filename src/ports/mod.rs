//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `QuestionGenerator` - Idea → clarifying-question schema
//! - `AnswerSuggester` - Per-question answer suggestion for auto-fill
//! - `PromptGenerator` - Idea + cleaned answers → final prompt
//!
//! All three fail with `ServiceError`.

mod answer_suggester;
mod prompt_generator;
mod question_generator;
mod service_error;

pub use answer_suggester::AnswerSuggester;
pub use prompt_generator::PromptGenerator;
pub use question_generator::QuestionGenerator;
pub use service_error::ServiceError;
