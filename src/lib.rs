//! Prompt Wizard - turns a free-text app idea into a structured build prompt.
//!
//! A remote service proposes clarifying questions for the idea, the user
//! answers them (optionally auto-filled one question at a time), and the
//! collected answers are sent back to produce the final prompt.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
