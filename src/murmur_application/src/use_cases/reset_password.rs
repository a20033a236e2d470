use murmur_core::{
    AccountStore, AccountStoreError, CredentialBlacklist, EphemeralStore, EphemeralStoreError,
    Password, PasswordHasher, PasswordHasherError, PasswordHistoryStore,
    PasswordHistoryStoreError, SessionStore, SingleUseToken, VerificationFlow,
    PASSWORD_HISTORY_DEPTH,
};

use super::revocation::{RevocationCoordinator, RevocationError};
use super::single_use_token::{SingleUseTokenIssuer, TokenConsumeError};

/// Error types for the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Session expired or invalid token")]
    TokenInvalid,
    #[error("Account not found")]
    AccountNotFound,
    #[error("New password cannot match the current or the last {PASSWORD_HISTORY_DEPTH} passwords")]
    PasswordReused,
    #[error(transparent)]
    EphemeralStore(#[from] EphemeralStoreError),
    #[error(transparent)]
    AccountStore(AccountStoreError),
    #[error(transparent)]
    History(#[from] PasswordHistoryStoreError),
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
    #[error(transparent)]
    Revocation(#[from] RevocationError),
}

impl From<TokenConsumeError> for ResetPasswordError {
    fn from(error: TokenConsumeError) -> Self {
        match error {
            TokenConsumeError::TokenInvalid => ResetPasswordError::TokenInvalid,
            TokenConsumeError::EphemeralStore(e) => ResetPasswordError::EphemeralStore(e),
        }
    }
}

/// Sets a new password from a proven reset token and logs the account out
/// everywhere.
pub struct ResetPasswordUseCase<S, A, P, H, Se, B>
where
    S: EphemeralStore,
    A: AccountStore,
    P: PasswordHistoryStore,
    H: PasswordHasher,
    Se: SessionStore,
    B: CredentialBlacklist,
{
    tokens: SingleUseTokenIssuer<S>,
    accounts: A,
    history: P,
    hasher: H,
    revocation: RevocationCoordinator<Se, B>,
}

impl<S, A, P, H, Se, B> ResetPasswordUseCase<S, A, P, H, Se, B>
where
    S: EphemeralStore,
    A: AccountStore,
    P: PasswordHistoryStore,
    H: PasswordHasher,
    Se: SessionStore,
    B: CredentialBlacklist,
{
    pub fn new(
        token_store: S,
        accounts: A,
        history: P,
        hasher: H,
        sessions: Se,
        blacklist: B,
    ) -> Self {
        Self {
            tokens: SingleUseTokenIssuer::new(token_store),
            accounts,
            history,
            hasher,
            revocation: RevocationCoordinator::new(sessions, blacklist),
        }
    }

    /// Execute the reset password use case
    ///
    /// Step order is load-bearing: the history entry records the hash being
    /// replaced, so it must be appended before the account is updated, and
    /// the bulk revocation runs only once the new password is durable.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: SingleUseToken,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let email = self.tokens.consume(VerificationFlow::Reset, &token).await?;

        let account = match self.accounts.get_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(ResetPasswordError::AccountNotFound);
            }
            Err(e) => return Err(ResetPasswordError::AccountStore(e)),
        };

        if self
            .hasher
            .verify(&new_password, account.password_hash())
            .await?
        {
            return Err(ResetPasswordError::PasswordReused);
        }

        let recent = self
            .history
            .recent_hashes(account.id(), PASSWORD_HISTORY_DEPTH)
            .await?;
        for old_hash in &recent {
            if self.hasher.verify(&new_password, old_hash).await? {
                return Err(ResetPasswordError::PasswordReused);
            }
        }

        self.history
            .record_hash(account.id(), account.password_hash().clone())
            .await?;

        let new_hash = self.hasher.hash(&new_password).await?;
        self.accounts
            .set_password_hash(account.id(), new_hash)
            .await
            .map_err(ResetPasswordError::AccountStore)?;

        self.revocation.revoke_account(account.id()).await?;

        Ok(())
    }
}
