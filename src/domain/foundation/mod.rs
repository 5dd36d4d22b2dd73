//! Foundation module - Shared domain primitives.
//!
//! Contains error types and the state machine contract that form the
//! vocabulary shared by the catalog, visibility, export and PDF modules.

mod errors;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use state_machine::StateMachine;
