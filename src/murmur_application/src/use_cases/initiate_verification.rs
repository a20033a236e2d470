use murmur_core::{
    AccountStore, AccountStoreError, Email, EmailClient, EphemeralStore, EphemeralStoreError,
    OtpCode, VerificationFlow,
};
use secrecy::{ExposeSecret, Secret};

use super::{verification_key, VERIFICATION_CODE_TTL};

const VERIFICATION_EMAIL_SUBJECT: &str = "Verify your email";

/// Error types for the initiate verification use case
#[derive(Debug, thiserror::Error)]
pub enum InitiateVerificationError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,
    #[error("No account found for this email")]
    AccountNotFound,
    #[error("A code was already sent. Please wait until it expires")]
    AlreadyPending,
    #[error("Failed to send email. Try again later")]
    DeliveryFailed,
    #[error(transparent)]
    EphemeralStore(#[from] EphemeralStoreError),
    #[error(transparent)]
    AccountStore(#[from] AccountStoreError),
}

/// Starts an email-ownership proof: generates a one-time code, stores its
/// salted hash and mails the digits out.
pub struct InitiateVerificationUseCase<S, A, E>
where
    S: EphemeralStore,
    A: AccountStore,
    E: EmailClient,
{
    store: S,
    accounts: A,
    email_client: E,
    otp_salt: Secret<String>,
}

impl<S, A, E> InitiateVerificationUseCase<S, A, E>
where
    S: EphemeralStore,
    A: AccountStore,
    E: EmailClient,
{
    pub fn new(store: S, accounts: A, email_client: E, otp_salt: Secret<String>) -> Self {
        Self {
            store,
            accounts,
            email_client,
            otp_salt,
        }
    }

    /// Execute the initiate verification use case
    ///
    /// The pending-record check is check-then-act: two concurrent calls for
    /// the same (flow, email) may both pass it and both write. That race is
    /// benign, the last write becomes authoritative.
    ///
    /// A delivery failure does not roll back the stored code: the caller
    /// has to wait out the TTL before a new code can be issued.
    #[tracing::instrument(name = "InitiateVerificationUseCase::execute", skip(self, email))]
    pub async fn execute(
        &self,
        email: Email,
        flow: VerificationFlow,
    ) -> Result<(), InitiateVerificationError> {
        let exists = self.accounts.email_taken(&email).await?;
        match flow {
            VerificationFlow::Register if exists => {
                return Err(InitiateVerificationError::EmailAlreadyRegistered);
            }
            VerificationFlow::Reset if !exists => {
                return Err(InitiateVerificationError::AccountNotFound);
            }
            _ => {}
        }

        let key = verification_key(flow, &email);
        if self.store.get(&key).await?.is_some() {
            return Err(InitiateVerificationError::AlreadyPending);
        }

        let code = OtpCode::random();
        self.store
            .put(
                &key,
                &code.hashed(self.otp_salt.expose_secret()),
                VERIFICATION_CODE_TTL,
            )
            .await?;

        let content = format!(
            "Your verification code is {}. Please enter it within 3 minutes to be validated.",
            code.as_str()
        );
        self.email_client
            .send_email(&email, VERIFICATION_EMAIL_SUBJECT, &content)
            .await
            .map_err(|_| InitiateVerificationError::DeliveryFailed)?;

        Ok(())
    }
}
