//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the wizard to external systems:
//! - `wizard_services` - Collaborator implementations (HTTP client, template, mock)
//! - `http` - axum router exposing any collaborator over the wire protocol

pub mod http;
pub mod wizard_services;

pub use http::{wizard_router, WizardApiState};
pub use wizard_services::{HttpWizardClient, HttpWizardConfig, MockWizardServices, TemplateWizardServices};
