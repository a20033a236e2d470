use murmur_core::{
    Account, AccountStore, AccountStoreError, EphemeralStore, EphemeralStoreError, Password,
    PasswordHasher, PasswordHasherError, SingleUseToken, Username, VerificationFlow,
};

use super::single_use_token::{SingleUseTokenIssuer, TokenConsumeError};

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Session expired or invalid token")]
    TokenInvalid,
    #[error(transparent)]
    EphemeralStore(#[from] EphemeralStoreError),
    #[error(transparent)]
    AccountStore(AccountStoreError),
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
}

impl From<TokenConsumeError> for RegisterError {
    fn from(error: TokenConsumeError) -> Self {
        match error {
            TokenConsumeError::TokenInvalid => RegisterError::TokenInvalid,
            TokenConsumeError::EphemeralStore(e) => RegisterError::EphemeralStore(e),
        }
    }
}

/// Creates an account from a proven email.
///
/// The token carries the email: the client never sends the address itself
/// at this step, only the proof that it was verified.
pub struct RegisterUseCase<A, S, H>
where
    A: AccountStore,
    S: EphemeralStore,
    H: PasswordHasher,
{
    accounts: A,
    tokens: SingleUseTokenIssuer<S>,
    hasher: H,
}

impl<A, S, H> RegisterUseCase<A, S, H>
where
    A: AccountStore,
    S: EphemeralStore,
    H: PasswordHasher,
{
    pub fn new(accounts: A, token_store: S, hasher: H) -> Self {
        Self {
            accounts,
            tokens: SingleUseTokenIssuer::new(token_store),
            hasher,
        }
    }

    /// Execute the register use case
    ///
    /// The uniqueness pre-check keeps the common failure cheap; the store's
    /// own constraint still backs it, so a race between two registrations
    /// of the same username resolves to exactly one account.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password, token))]
    pub async fn execute(
        &self,
        username: Username,
        password: Password,
        token: SingleUseToken,
    ) -> Result<(), RegisterError> {
        if self.accounts.username_taken(&username).await.map_err(RegisterError::AccountStore)? {
            return Err(RegisterError::UsernameTaken);
        }

        let email = self
            .tokens
            .consume(VerificationFlow::Register, &token)
            .await?;

        let password_hash = self.hasher.hash(&password).await?;
        let account = Account::new(username, email, password_hash, true);

        self.accounts.add_account(account).await.map_err(|e| match e {
            AccountStoreError::UsernameTaken => RegisterError::UsernameTaken,
            other => RegisterError::AccountStore(other),
        })
    }
}
