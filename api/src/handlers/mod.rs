//! Response helpers shared by the route handlers

pub mod error;

pub use error::{flow_error_response, json_error_handler, validation_failure};
