//! Postgres repository implementations

pub mod account_repository_impl;
pub mod otp_token_repository_impl;

pub use account_repository_impl::PgAccountRepository;
pub use otp_token_repository_impl::PgOtpTokenRepository;
