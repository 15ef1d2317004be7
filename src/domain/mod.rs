//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, state machine trait, error codes)
//! - `wizard` - Question schema, answer store, validation and auto-fill

pub mod foundation;
pub mod wizard;
