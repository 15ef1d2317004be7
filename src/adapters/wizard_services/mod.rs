//! Wizard service adapters.
//!
//! Implementations of the collaborator ports (`QuestionGenerator`,
//! `AnswerSuggester`, `PromptGenerator`).
//!
//! ## Available Adapters
//!
//! - `HttpWizardClient` - Remote backend over the JSON wire protocol
//! - `TemplateWizardServices` - Fixed schema and template prompt, no model
//! - `MockWizardServices` - Configurable mock for testing

mod http_client;
mod mock_services;
mod template_services;

pub use http_client::{HttpWizardClient, HttpWizardConfig};
pub use mock_services::{MockWizardServices, SuggestionGate};
pub use template_services::TemplateWizardServices;
