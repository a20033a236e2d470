use std::time::Duration;

use murmur_core::{Email, SingleUseToken, VerificationFlow};
use secrecy::ExposeSecret;

pub mod confirm_verification;
pub mod initiate_verification;
pub mod login;
pub mod logout;
pub mod register;
pub mod reset_password;
pub mod revocation;
pub mod rotate_session;
pub mod single_use_token;

/// How long an issued verification code stays valid.
pub const VERIFICATION_CODE_TTL: Duration = Duration::from_secs(180);

/// How long a single-use token stays consumable after a successful proof.
pub const SINGLE_USE_TOKEN_TTL: Duration = Duration::from_secs(600);

/// Ephemeral key for a pending verification: `verify:{flow}:{email}`.
/// At most one entry per (flow, email) may exist.
pub(crate) fn verification_key(flow: VerificationFlow, email: &Email) -> String {
    format!("verify:{}:{}", flow, email.as_ref().expose_secret())
}

/// Ephemeral key for a single-use token: `verified_token:{flow}:{token}`.
pub(crate) fn token_key(flow: VerificationFlow, token: &SingleUseToken) -> String {
    format!("verified_token:{}:{}", flow, token.as_str())
}
