//! Route handlers
//!
//! - `otp` - send, verify and resend codes for any purpose
//! - `auth` - the password reset flow built on a `password_reset` code

pub mod auth;
pub mod otp;

use std::sync::Arc;

use campus_core::repositories::{AccountRepository, OtpTokenRepository};
use campus_core::services::{AuthFlowService, EmailServiceTrait, IdentityProviderTrait};

/// Application state that holds shared services
pub struct AppState<R, A, E, I>
where
    R: OtpTokenRepository,
    A: AccountRepository,
    E: EmailServiceTrait + ?Sized,
    I: IdentityProviderTrait + ?Sized,
{
    pub auth_service: Arc<AuthFlowService<R, A, E, I>>,
}

impl<R, A, E, I> AppState<R, A, E, I>
where
    R: OtpTokenRepository,
    A: AccountRepository,
    E: EmailServiceTrait + ?Sized,
    I: IdentityProviderTrait + ?Sized,
{
    pub fn new(auth_service: Arc<AuthFlowService<R, A, E, I>>) -> Self {
        Self { auth_service }
    }
}
