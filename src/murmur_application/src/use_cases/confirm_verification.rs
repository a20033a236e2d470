use murmur_core::{
    Email, EphemeralStore, EphemeralStoreError, OtpCode, SingleUseToken, VerificationFlow,
};
use secrecy::{ExposeSecret, Secret};

use super::{single_use_token::SingleUseTokenIssuer, verification_key};

/// Error types for the confirm verification use case
#[derive(Debug, thiserror::Error)]
pub enum ConfirmVerificationError {
    #[error("Verification code expired")]
    Expired,
    #[error("Incorrect code")]
    InvalidCode,
    #[error(transparent)]
    EphemeralStore(#[from] EphemeralStoreError),
}

/// Checks a submitted one-time code and, on a match, exchanges the proof
/// for a single-use token.
pub struct ConfirmVerificationUseCase<S>
where
    S: EphemeralStore,
{
    store: S,
    tokens: SingleUseTokenIssuer<S>,
    otp_salt: Secret<String>,
}

impl<S> ConfirmVerificationUseCase<S>
where
    S: EphemeralStore + Clone,
{
    pub fn new(store: S, otp_salt: Secret<String>) -> Self {
        Self {
            tokens: SingleUseTokenIssuer::new(store.clone()),
            store,
            otp_salt,
        }
    }

    /// Execute the confirm verification use case
    ///
    /// A missing entry means the code expired; a code that never existed
    /// reads the same way. A mismatch leaves the entry intact so the user
    /// may retry until the TTL runs out.
    ///
    /// The token is issued before the pending entry is deleted: a crash in
    /// between leaves a re-confirmable code rather than a burnt proof.
    #[tracing::instrument(name = "ConfirmVerificationUseCase::execute", skip(self, email, code))]
    pub async fn execute(
        &self,
        email: Email,
        flow: VerificationFlow,
        code: OtpCode,
    ) -> Result<SingleUseToken, ConfirmVerificationError> {
        let key = verification_key(flow, &email);

        let stored_hash = self
            .store
            .get(&key)
            .await?
            .ok_or(ConfirmVerificationError::Expired)?;

        if code.hashed(self.otp_salt.expose_secret()) != stored_hash {
            return Err(ConfirmVerificationError::InvalidCode);
        }

        let token = self.tokens.issue(flow, &email).await?;
        self.store.delete(&key).await?;

        Ok(token)
    }
}
