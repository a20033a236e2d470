use murmur_core::{Email, EphemeralStore, EphemeralStoreError, SingleUseToken, VerificationFlow};
use secrecy::{ExposeSecret, Secret};

use super::{token_key, SINGLE_USE_TOKEN_TTL};

/// Error types for consuming a single-use token
#[derive(Debug, thiserror::Error)]
pub enum TokenConsumeError {
    #[error("Session expired or invalid token")]
    TokenInvalid,
    #[error(transparent)]
    EphemeralStore(#[from] EphemeralStoreError),
}

/// Issues and consumes single-use tokens binding a verified email to a
/// follow-up step.
pub struct SingleUseTokenIssuer<S>
where
    S: EphemeralStore,
{
    store: S,
}

impl<S> SingleUseTokenIssuer<S>
where
    S: EphemeralStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Mint a fresh token and bind it to `email` under the given flow.
    #[tracing::instrument(name = "SingleUseTokenIssuer::issue", skip(self, email))]
    pub async fn issue(
        &self,
        flow: VerificationFlow,
        email: &Email,
    ) -> Result<SingleUseToken, EphemeralStoreError> {
        let token = SingleUseToken::random();
        self.store
            .put(
                &token_key(flow, &token),
                email.as_ref().expose_secret(),
                SINGLE_USE_TOKEN_TTL,
            )
            .await?;
        Ok(token)
    }

    /// Resolve a token back to its email, consuming it.
    ///
    /// The store's `take` is a single atomic step; a second consumer of the
    /// same token can never observe the value.
    #[tracing::instrument(name = "SingleUseTokenIssuer::consume", skip(self, token))]
    pub async fn consume(
        &self,
        flow: VerificationFlow,
        token: &SingleUseToken,
    ) -> Result<Email, TokenConsumeError> {
        let value = self
            .store
            .take(&token_key(flow, token))
            .await?
            .ok_or(TokenConsumeError::TokenInvalid)?;

        Email::try_from(Secret::from(value)).map_err(|_| TokenConsumeError::TokenInvalid)
    }
}
