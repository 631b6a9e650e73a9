//! # Campus Connect Core
//!
//! Core business logic for issuing and verifying one-time passwords.
//! This crate contains the token entity and its attempt state machine,
//! repository interfaces with in-memory mocks, the lifecycle services and
//! the composite send/verify/reset flows used by the HTTP layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
