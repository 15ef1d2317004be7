//! Wizard HTTP adapter - the collaborator service protocol over REST.
//!
//! Provides endpoints for:
//! - Generating the question schema for an idea
//! - Suggesting an answer for one question
//! - Generating the final prompt

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::WizardApiState;
pub use routes::{wizard_router, wizard_routes};
