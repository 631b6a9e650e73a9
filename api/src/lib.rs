//! # Campus Connect API
//!
//! actix-web handlers for sending, verifying and resending one-time
//! passwords and for the password reset flow.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure_routes, create_app, json_config};
pub use routes::AppState;
