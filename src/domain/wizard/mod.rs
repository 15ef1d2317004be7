//! Wizard Domain Module
//!
//! Answer collection for a server-defined question schema.
//!
//! # Architecture
//!
//! - **Question**: the immutable schema and its type tags
//! - **Answer**: answer values and the type-aware input dispatch
//! - **AnswerStore**: the mutable id → answer mapping and its cleaned view
//! - **Validator**: required-field checks gating prompt generation
//! - **AutoFill**: the sequential suggestion state machine
//!
//! Everything in here is synchronous; the application layer performs the
//! remote calls and feeds their results back in.

pub mod answer;
pub mod answer_store;
pub mod autofill;
pub mod errors;
pub mod question;
pub mod validator;

pub use answer::*;
pub use answer_store::*;
pub use autofill::*;
pub use errors::*;
pub use question::*;
pub use validator::*;
