use murmur_core::{CredentialBlacklist, CredentialCodec, SessionStore};

use super::revocation::{RevocationCoordinator, RevocationError};

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Invalid refresh credential")]
    InvalidCredential,
    #[error(transparent)]
    Revocation(#[from] RevocationError),
}

/// Logout use case - kills the session behind a refresh credential.
pub struct LogoutUseCase<S, C, B>
where
    S: SessionStore,
    C: CredentialCodec,
    B: CredentialBlacklist,
{
    codec: C,
    revocation: RevocationCoordinator<S, B>,
}

impl<S, C, B> LogoutUseCase<S, C, B>
where
    S: SessionStore,
    C: CredentialCodec,
    B: CredentialBlacklist,
{
    pub fn new(sessions: S, codec: C, blacklist: B) -> Self {
        Self {
            codec,
            revocation: RevocationCoordinator::new(sessions, blacklist),
        }
    }

    /// Execute the logout use case
    ///
    /// Only an undecodable credential is an error. A decodable credential
    /// whose session is gone or already revoked logs out successfully:
    /// repeated logouts land in the same terminal state, and the response
    /// never reveals whether a session existed.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, credential: &str) -> Result<(), LogoutError> {
        let claims = self
            .codec
            .verify_refresh(credential)
            .map_err(|_| LogoutError::InvalidCredential)?;

        self.revocation.revoke_session(claims.jti).await?;

        Ok(())
    }
}
