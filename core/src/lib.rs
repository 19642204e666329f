//! # SimGate Core
//!
//! Core domain and orchestration layer for the SimGate phone sign-in flow.
//! This crate contains the domain value objects, the error taxonomy, the
//! collaborator traits (risk check, identity provider, handle storage, UI
//! surface), and the sign-in flow orchestrator that sequences them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
