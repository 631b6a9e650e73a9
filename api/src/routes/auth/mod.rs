//! Endpoints under `/api/v1/auth`

pub mod reset_password;

pub use reset_password::reset_password;
