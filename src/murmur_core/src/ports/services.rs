use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

/// Port trait for email sending service. Single attempt, no internal retry.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),
}

/// Opaque one-way password function. The core only ever asks for a fresh
/// hash or a yes/no comparison; algorithm choice lives in the adapter.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHasherError>;

    /// `Ok(false)` is a mismatch; `Err` is an operational failure.
    async fn verify(
        &self,
        candidate: &Password,
        expected_hash: &Secret<String>,
    ) -> Result<bool, PasswordHasherError>;
}
