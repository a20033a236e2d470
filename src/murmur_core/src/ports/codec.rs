use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a refresh credential. `jti` is the stable key matching
/// a session record across rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    pub account_id: Uuid,
    pub jti: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CredentialCodecError {
    #[error("Invalid credential")]
    InvalidCredential,
    #[error("Failed to mint credential: {0}")]
    MintError(String),
}

impl PartialEq for CredentialCodecError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidCredential, Self::InvalidCredential)
                | (Self::MintError(_), Self::MintError(_))
        )
    }
}

/// Signed-credential codec. Minting and verification are pure CPU work, so
/// the port is synchronous; blacklisting is a separate store port.
pub trait CredentialCodec: Send + Sync {
    /// Short-lived credential returned in response bodies.
    fn mint_access(&self, account_id: Uuid) -> Result<String, CredentialCodecError>;

    /// Long-lived credential set as a cookie; embeds the session `jti`.
    fn mint_refresh(&self, claims: &RefreshClaims) -> Result<String, CredentialCodecError>;

    /// Signature and expiry check only. Revocation state is the session
    /// store's and blacklist's business.
    fn verify_refresh(&self, credential: &str) -> Result<RefreshClaims, CredentialCodecError>;
}
