//! HTTP adapters - REST API implementations.

pub mod wizard;

pub use wizard::{wizard_router, WizardApiState};
