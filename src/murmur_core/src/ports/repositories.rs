use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{account::Account, email::Email, session::SessionRecord, username::Username};

/// How many prior password hashes are retained and rejected on reuse.
pub const PASSWORD_HISTORY_DEPTH: usize = 3;

// EphemeralStore port trait and errors
#[derive(Debug, Error)]
pub enum EphemeralStoreError {
    #[error("Store error: {0}")]
    StoreError(String),
}

/// TTL-based key/value storage for transient proof artifacts.
///
/// Expiry is passive: there is no sweeper, and a `get` after expiry is
/// indistinguishable from a key never set. No guarantees beyond single-key
/// operations.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), EphemeralStoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, EphemeralStoreError>;
    async fn delete(&self, key: &str) -> Result<(), EphemeralStoreError>;
    /// Atomic read-then-delete. Two concurrent `take`s of the same key must
    /// never both observe the value.
    async fn take(&self, key: &str) -> Result<Option<String>, EphemeralStoreError>;
}

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already registered")]
    EmailTaken,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailTaken, Self::EmailTaken)
                | (Self::UsernameTaken, Self::UsernameTaken)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError>;
    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn get_by_username(&self, username: &Username) -> Result<Account, AccountStoreError>;
    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError>;
    async fn username_taken(&self, username: &Username) -> Result<bool, AccountStoreError>;
    async fn set_password_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Refresh session revoked or unknown")]
    RevokedOrUnknown,
    #[error("Duplicate session id")]
    DuplicateJti,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::RevokedOrUnknown, Self::RevokedOrUnknown)
                | (Self::DuplicateJti, Self::DuplicateJti)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Replacement values applied to a session row when a rotation claims it.
#[derive(Debug, Clone)]
pub struct SessionRotation {
    pub new_jti: Uuid,
    pub credential_fingerprint: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionStoreError>;

    /// Compare-and-swap: claim the row holding `old_jti` where
    /// `revoked = false` and the row is unexpired, and move it to the
    /// rotation's new values in place. Exactly one of two racing rotations
    /// can win; the loser gets `RevokedOrUnknown`.
    async fn rotate(
        &self,
        old_jti: Uuid,
        rotation: SessionRotation,
    ) -> Result<(), SessionStoreError>;

    /// Idempotent: revoking an already-revoked or unknown `jti` is success.
    async fn revoke(&self, jti: Uuid) -> Result<(), SessionStoreError>;

    async fn active_jtis(&self, account_id: Uuid) -> Result<Vec<Uuid>, SessionStoreError>;

    async fn revoke_all(&self, account_id: Uuid) -> Result<(), SessionStoreError>;
}

// PasswordHistoryStore port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHistoryStoreError {
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait PasswordHistoryStore: Send + Sync {
    /// Most recent first, at most `limit` entries.
    async fn recent_hashes(
        &self,
        account_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Secret<String>>, PasswordHistoryStoreError>;

    /// Append a hash; entries beyond `PASSWORD_HISTORY_DEPTH` are evicted
    /// oldest first.
    async fn record_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), PasswordHistoryStoreError>;
}

// CredentialBlacklist port trait and errors
#[derive(Debug, Error)]
pub enum CredentialBlacklistError {
    #[error("Store error: {0}")]
    StoreError(String),
}

/// Layer-1 revocation: a banned `jti` is dead even if its session row were
/// somehow still active.
#[async_trait]
pub trait CredentialBlacklist: Send + Sync {
    async fn ban(&self, jti: Uuid) -> Result<(), CredentialBlacklistError>;
    async fn is_banned(&self, jti: Uuid) -> Result<bool, CredentialBlacklistError>;
}
