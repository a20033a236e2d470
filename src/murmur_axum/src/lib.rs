//! Axum routes for the credential and session lifecycle service.
//!
//! Handlers are generic over the `murmur_core` ports; each route receives
//! exactly the stores it needs via `State`. Wiring lives in
//! `murmur_auth_service`.

pub mod client_ip;
pub mod cookies;
pub mod error;
pub mod routes;

use secrecy::Secret;

pub use cookies::REFRESH_COOKIE_NAME;
pub use error::{ApiError, ErrorResponse};

/// Per-route configuration for the verification flows.
#[derive(Clone)]
pub struct VerificationConfig {
    pub otp_salt: Secret<String>,
}

/// Per-route configuration for session-issuing flows.
#[derive(Clone)]
pub struct SessionLifetime {
    pub refresh_ttl_in_seconds: i64,
}

impl SessionLifetime {
    pub(crate) fn as_duration(&self) -> Result<chrono::Duration, ApiError> {
        chrono::Duration::try_seconds(self.refresh_ttl_in_seconds)
            .ok_or_else(|| ApiError::DependencyError("Invalid refresh lifetime".to_string()))
    }
}
