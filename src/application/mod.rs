//! Application layer - orchestrates the wizard workflow.
//!
//! The domain stays synchronous and pure; this layer performs the remote
//! calls through the ports and applies their results to shared state.

pub mod wizard;

pub use wizard::{WizardController, WizardSnapshot};
