use chrono::{Duration, Utc};
use murmur_core::{
    AccountStore, AccountStoreError, ClientOrigin, CredentialCodec, CredentialCodecError,
    Password, PasswordHasher, PasswordHasherError, RefreshClaims, SessionRecord, SessionStore,
    SessionStoreError, Username,
};
use uuid::Uuid;

/// Response from the login use case
#[derive(Debug)]
pub struct LoginOutcome {
    pub username: Username,
    pub access_credential: String,
    pub refresh_credential: String,
}

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    AccountStore(AccountStoreError),
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
    #[error(transparent)]
    Codec(#[from] CredentialCodecError),
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
}

/// Authenticates an account and opens a refresh session for the device.
pub struct LoginUseCase<A, S, C, H>
where
    A: AccountStore,
    S: SessionStore,
    C: CredentialCodec,
    H: PasswordHasher,
{
    accounts: A,
    sessions: S,
    codec: C,
    hasher: H,
    refresh_lifetime: Duration,
}

impl<A, S, C, H> LoginUseCase<A, S, C, H>
where
    A: AccountStore,
    S: SessionStore,
    C: CredentialCodec,
    H: PasswordHasher,
{
    pub fn new(accounts: A, sessions: S, codec: C, hasher: H, refresh_lifetime: Duration) -> Self {
        Self {
            accounts,
            sessions,
            codec,
            hasher,
            refresh_lifetime,
        }
    }

    /// Execute the login use case
    ///
    /// Unknown username and wrong password collapse into the same error so
    /// the response does not reveal which accounts exist.
    ///
    /// The session insert is the last step: the request either leaves a
    /// fully valid new session behind or none at all.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password, origin))]
    pub async fn execute(
        &self,
        username: Username,
        password: Password,
        origin: ClientOrigin,
    ) -> Result<LoginOutcome, LoginError> {
        let account = match self.accounts.get_by_username(&username).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(LoginError::InvalidCredentials),
            Err(e) => return Err(LoginError::AccountStore(e)),
        };

        if !self
            .hasher
            .verify(&password, account.password_hash())
            .await?
        {
            return Err(LoginError::InvalidCredentials);
        }

        let jti = Uuid::new_v4();
        let expires_at = Utc::now() + self.refresh_lifetime;

        let access_credential = self.codec.mint_access(account.id())?;
        let refresh_credential = self.codec.mint_refresh(&RefreshClaims {
            account_id: account.id(),
            jti,
            expires_at,
        })?;

        let record = SessionRecord::open(
            account.id(),
            jti,
            SessionRecord::fingerprint(&refresh_credential),
            origin,
            self.refresh_lifetime,
        );
        self.sessions.insert(record).await?;

        Ok(LoginOutcome {
            username: account.username().clone(),
            access_credential,
            refresh_credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::{Account, Email, SessionRotation};
    use secrecy::{ExposeSecret, Secret};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Clone)]
    struct MockAccountStore {
        account: Account,
    }

    #[async_trait::async_trait]
    impl AccountStore for MockAccountStore {
        async fn add_account(&self, _account: Account) -> Result<(), AccountStoreError> {
            unimplemented!()
        }

        async fn get_by_email(&self, _email: &Email) -> Result<Account, AccountStoreError> {
            unimplemented!()
        }

        async fn get_by_username(&self, username: &Username) -> Result<Account, AccountStoreError> {
            if self.account.username() == username {
                Ok(self.account.clone())
            } else {
                Err(AccountStoreError::AccountNotFound)
            }
        }

        async fn email_taken(&self, _email: &Email) -> Result<bool, AccountStoreError> {
            unimplemented!()
        }

        async fn username_taken(&self, _username: &Username) -> Result<bool, AccountStoreError> {
            unimplemented!()
        }

        async fn set_password_hash(
            &self,
            _account_id: Uuid,
            _password_hash: Secret<String>,
        ) -> Result<(), AccountStoreError> {
            unimplemented!()
        }
    }

    #[derive(Clone, Default)]
    struct MockSessionStore {
        records: Arc<RwLock<Vec<SessionRecord>>>,
    }

    #[async_trait::async_trait]
    impl SessionStore for MockSessionStore {
        async fn insert(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
            self.records.write().await.push(record);
            Ok(())
        }

        async fn rotate(
            &self,
            _old_jti: Uuid,
            _rotation: SessionRotation,
        ) -> Result<(), SessionStoreError> {
            unimplemented!()
        }

        async fn revoke(&self, _jti: Uuid) -> Result<(), SessionStoreError> {
            unimplemented!()
        }

        async fn active_jtis(&self, _account_id: Uuid) -> Result<Vec<Uuid>, SessionStoreError> {
            unimplemented!()
        }

        async fn revoke_all(&self, _account_id: Uuid) -> Result<(), SessionStoreError> {
            unimplemented!()
        }
    }

    #[derive(Clone)]
    struct MockCodec;

    impl CredentialCodec for MockCodec {
        fn mint_access(&self, account_id: Uuid) -> Result<String, CredentialCodecError> {
            Ok(format!("access:{account_id}"))
        }

        fn mint_refresh(&self, claims: &RefreshClaims) -> Result<String, CredentialCodecError> {
            Ok(format!("refresh:{}:{}", claims.account_id, claims.jti))
        }

        fn verify_refresh(&self, credential: &str) -> Result<RefreshClaims, CredentialCodecError> {
            let mut parts = credential.splitn(3, ':');
            if parts.next() != Some("refresh") {
                return Err(CredentialCodecError::InvalidCredential);
            }
            let account_id = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(CredentialCodecError::InvalidCredential)?;
            let jti = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(CredentialCodecError::InvalidCredential)?;
            Ok(RefreshClaims {
                account_id,
                jti,
                expires_at: Utc::now() + Duration::days(7),
            })
        }
    }

    #[derive(Clone)]
    struct MockPasswordHasher;

    #[async_trait::async_trait]
    impl PasswordHasher for MockPasswordHasher {
        async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHasherError> {
            Ok(Secret::from(format!(
                "hashed:{}",
                password.as_ref().expose_secret()
            )))
        }

        async fn verify(
            &self,
            candidate: &Password,
            expected_hash: &Secret<String>,
        ) -> Result<bool, PasswordHasherError> {
            Ok(expected_hash.expose_secret()
                == &format!("hashed:{}", candidate.as_ref().expose_secret()))
        }
    }

    fn account() -> Account {
        Account::new(
            Username::try_from("kofi".to_string()).unwrap(),
            Email::try_from(Secret::from("a@x.com".to_string())).unwrap(),
            Secret::from("hashed:password123".to_string()),
            true,
        )
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn login_opens_a_session_bound_to_the_refresh_credential() {
        let account = account();
        let sessions = MockSessionStore::default();
        let use_case = LoginUseCase::new(
            MockAccountStore {
                account: account.clone(),
            },
            sessions.clone(),
            MockCodec,
            MockPasswordHasher,
            Duration::days(7),
        );

        let outcome = use_case
            .execute(
                account.username().clone(),
                password("password123"),
                ClientOrigin::default(),
            )
            .await
            .unwrap();

        let records = sessions.records.read().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].account_id, account.id());
        assert!(!records[0].revoked);
        assert_eq!(
            records[0].credential_fingerprint,
            SessionRecord::fingerprint(&outcome.refresh_credential)
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let account = account();
        let use_case = LoginUseCase::new(
            MockAccountStore {
                account: account.clone(),
            },
            MockSessionStore::default(),
            MockCodec,
            MockPasswordHasher,
            Duration::days(7),
        );

        let wrong_password = use_case
            .execute(
                account.username().clone(),
                password("wrong-password"),
                ClientOrigin::default(),
            )
            .await;
        let unknown_user = use_case
            .execute(
                Username::try_from("nobody".to_string()).unwrap(),
                password("password123"),
                ClientOrigin::default(),
            )
            .await;

        assert!(matches!(wrong_password, Err(LoginError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(LoginError::InvalidCredentials)));
    }
}
