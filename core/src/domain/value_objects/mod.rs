//! Value objects representing immutable domain concepts.

pub mod attempt_outcome;

pub use attempt_outcome::{messages, AttemptOutcome};
