//! End-to-end lifecycle tests: the real use cases wired to the in-memory
//! adapters and the real JWT codec, with only email delivery mocked.

use chrono::Duration;
use murmur_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryCredentialBlacklist,
    InMemoryEphemeralStore, InMemoryPasswordHistoryStore, InMemorySessionStore, JwtCodecConfig,
    JwtCredentialCodec, MockEmailClient,
};
use murmur_application::{
    ConfirmVerificationUseCase, InitiateVerificationError, InitiateVerificationUseCase,
    LoginUseCase, LogoutUseCase, RegisterUseCase, ResetPasswordUseCase, RotateSessionError,
    RotateSessionUseCase,
};
use murmur_core::{
    ClientOrigin, Email, OtpCode, Password, SingleUseToken, Username, VerificationFlow,
};
use secrecy::Secret;

const REFRESH_LIFETIME_DAYS: i64 = 7;

struct Harness {
    ephemeral: InMemoryEphemeralStore,
    accounts: InMemoryAccountStore,
    history: InMemoryPasswordHistoryStore,
    sessions: InMemorySessionStore,
    blacklist: InMemoryCredentialBlacklist,
    codec: JwtCredentialCodec,
    hasher: Argon2PasswordHasher,
    email_client: MockEmailClient,
    otp_salt: Secret<String>,
}

impl Harness {
    fn new() -> Self {
        Self {
            ephemeral: InMemoryEphemeralStore::new(),
            accounts: InMemoryAccountStore::new(),
            history: InMemoryPasswordHistoryStore::new(),
            sessions: InMemorySessionStore::new(),
            blacklist: InMemoryCredentialBlacklist::new(),
            codec: JwtCredentialCodec::new(JwtCodecConfig {
                jwt_secret: Secret::from("integration-test-secret".to_string()),
                access_ttl_in_seconds: 600,
            }),
            hasher: Argon2PasswordHasher::new(),
            email_client: MockEmailClient::new(),
            otp_salt: Secret::from("integration-test-salt".to_string()),
        }
    }

    fn refresh_lifetime(&self) -> Duration {
        Duration::days(REFRESH_LIFETIME_DAYS)
    }

    fn initiate(
        &self,
    ) -> InitiateVerificationUseCase<InMemoryEphemeralStore, InMemoryAccountStore, MockEmailClient>
    {
        InitiateVerificationUseCase::new(
            self.ephemeral.clone(),
            self.accounts.clone(),
            self.email_client.clone(),
            self.otp_salt.clone(),
        )
    }

    fn confirm(&self) -> ConfirmVerificationUseCase<InMemoryEphemeralStore> {
        ConfirmVerificationUseCase::new(self.ephemeral.clone(), self.otp_salt.clone())
    }

    fn register(
        &self,
    ) -> RegisterUseCase<InMemoryAccountStore, InMemoryEphemeralStore, Argon2PasswordHasher> {
        RegisterUseCase::new(
            self.accounts.clone(),
            self.ephemeral.clone(),
            self.hasher.clone(),
        )
    }

    fn login(
        &self,
    ) -> LoginUseCase<
        InMemoryAccountStore,
        InMemorySessionStore,
        JwtCredentialCodec,
        Argon2PasswordHasher,
    > {
        LoginUseCase::new(
            self.accounts.clone(),
            self.sessions.clone(),
            self.codec.clone(),
            self.hasher.clone(),
            self.refresh_lifetime(),
        )
    }

    fn rotate(
        &self,
    ) -> RotateSessionUseCase<InMemorySessionStore, JwtCredentialCodec, InMemoryCredentialBlacklist>
    {
        RotateSessionUseCase::new(
            self.sessions.clone(),
            self.codec.clone(),
            self.blacklist.clone(),
            self.refresh_lifetime(),
        )
    }

    fn logout(
        &self,
    ) -> LogoutUseCase<InMemorySessionStore, JwtCredentialCodec, InMemoryCredentialBlacklist> {
        LogoutUseCase::new(
            self.sessions.clone(),
            self.codec.clone(),
            self.blacklist.clone(),
        )
    }

    fn reset(
        &self,
    ) -> ResetPasswordUseCase<
        InMemoryEphemeralStore,
        InMemoryAccountStore,
        InMemoryPasswordHistoryStore,
        Argon2PasswordHasher,
        InMemorySessionStore,
        InMemoryCredentialBlacklist,
    > {
        ResetPasswordUseCase::new(
            self.ephemeral.clone(),
            self.accounts.clone(),
            self.history.clone(),
            self.hasher.clone(),
            self.sessions.clone(),
            self.blacklist.clone(),
        )
    }

    /// Run the whole proof-of-ownership flow and return the single-use
    /// token, reading the code out of the captured email.
    async fn prove_email(&self, raw_email: &str, flow: VerificationFlow) -> SingleUseToken {
        self.initiate()
            .execute(email(raw_email), flow)
            .await
            .expect("initiate should succeed");

        let sent = self
            .email_client
            .last_sent()
            .await
            .expect("a verification email should have been sent");
        assert_eq!(sent.recipient, raw_email);

        let code = extract_code(&sent.content);
        self.confirm()
            .execute(email(raw_email), flow, code)
            .await
            .expect("confirm should succeed")
    }

    async fn register_account(&self, raw_username: &str, raw_email: &str, raw_password: &str) {
        let token = self.prove_email(raw_email, VerificationFlow::Register).await;
        self.register()
            .execute(username(raw_username), password(raw_password), token)
            .await
            .expect("registration should succeed");
    }
}

fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

fn username(raw: &str) -> Username {
    Username::try_from(raw.to_string()).unwrap()
}

fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

fn extract_code(content: &str) -> OtpCode {
    let digits = content
        .split("code is ")
        .nth(1)
        .expect("email should contain the code")
        .chars()
        .take(6)
        .collect::<String>();
    OtpCode::parse(digits).expect("email should carry a six digit code")
}

/// A wrong guess that can never collide with the real code.
fn wrong_code(actual: &OtpCode) -> OtpCode {
    let guess = if actual.as_str() == "000000" {
        "000001"
    } else {
        "000000"
    };
    OtpCode::parse(guess.to_string()).unwrap()
}

#[tokio::test]
async fn register_login_rotate_and_replay_defense() {
    let harness = Harness::new();

    // Prove the email, with one wrong guess in between.
    harness
        .initiate()
        .execute(email("a@x.com"), VerificationFlow::Register)
        .await
        .unwrap();
    let sent = harness.email_client.last_sent().await.unwrap();
    let code = extract_code(&sent.content);

    let miss = harness
        .confirm()
        .execute(
            email("a@x.com"),
            VerificationFlow::Register,
            wrong_code(&code),
        )
        .await;
    assert!(miss.is_err(), "a wrong code must be rejected");

    // The entry survived the wrong guess, so the right code still works.
    let token = harness
        .confirm()
        .execute(email("a@x.com"), VerificationFlow::Register, code.clone())
        .await
        .unwrap();

    // The pending entry is gone: confirming again reads as expired.
    let again = harness
        .confirm()
        .execute(email("a@x.com"), VerificationFlow::Register, code)
        .await;
    assert!(again.is_err());

    harness
        .register()
        .execute(username("kofi"), password("password123"), token)
        .await
        .unwrap();

    let outcome = harness
        .login()
        .execute(
            username("kofi"),
            password("password123"),
            ClientOrigin::default(),
        )
        .await
        .unwrap();

    // One session row, bound to the issued credential.
    let records = harness.sessions.records().await;
    assert_eq!(records.len(), 1);
    let first_jti = records[0].jti;

    // Rotate: same row, new jti.
    let rotated = harness
        .rotate()
        .execute(&outcome.refresh_credential)
        .await
        .unwrap();
    let records = harness.sessions.records().await;
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].jti, first_jti);

    // The original credential is permanently dead; the rotated one works.
    let replay = harness.rotate().execute(&outcome.refresh_credential).await;
    assert!(matches!(replay, Err(RotateSessionError::RevokedOrUnknown)));
    assert!(harness
        .rotate()
        .execute(&rotated.refresh_credential)
        .await
        .is_ok());
}

#[tokio::test]
async fn second_initiate_before_expiry_is_rejected() {
    let harness = Harness::new();

    harness
        .initiate()
        .execute(email("a@x.com"), VerificationFlow::Register)
        .await
        .unwrap();

    let second = harness
        .initiate()
        .execute(email("a@x.com"), VerificationFlow::Register)
        .await;
    assert!(matches!(
        second,
        Err(InitiateVerificationError::AlreadyPending)
    ));

    // Only one email went out.
    assert_eq!(harness.email_client.sent().await.len(), 1);
}

#[tokio::test]
async fn logout_kills_the_session_and_is_idempotent() {
    let harness = Harness::new();
    harness.register_account("kofi", "a@x.com", "password123").await;

    let outcome = harness
        .login()
        .execute(
            username("kofi"),
            password("password123"),
            ClientOrigin::default(),
        )
        .await
        .unwrap();

    harness
        .logout()
        .execute(&outcome.refresh_credential)
        .await
        .unwrap();

    // Rotation on the logged-out credential fails through both layers.
    let rotate = harness.rotate().execute(&outcome.refresh_credential).await;
    assert!(matches!(rotate, Err(RotateSessionError::RevokedOrUnknown)));

    // Logging out again is success, not an error.
    assert!(harness
        .logout()
        .execute(&outcome.refresh_credential)
        .await
        .is_ok());
}

#[tokio::test]
async fn reset_logs_the_account_out_everywhere() {
    let harness = Harness::new();
    harness.register_account("kofi", "a@x.com", "password123").await;

    // Two device sessions.
    let first = harness
        .login()
        .execute(
            username("kofi"),
            password("password123"),
            ClientOrigin::default(),
        )
        .await
        .unwrap();
    let second = harness
        .login()
        .execute(
            username("kofi"),
            password("password123"),
            ClientOrigin {
                user_agent: Some("other-device".to_string()),
                ip_address: None,
            },
        )
        .await
        .unwrap();

    let token = harness.prove_email("a@x.com", VerificationFlow::Reset).await;
    harness
        .reset()
        .execute(token, password("password456"))
        .await
        .unwrap();

    // Every prior credential is rejected afterwards.
    for credential in [&first.refresh_credential, &second.refresh_credential] {
        let rotate = harness.rotate().execute(credential).await;
        assert!(matches!(rotate, Err(RotateSessionError::RevokedOrUnknown)));
    }

    // The old password no longer logs in; the new one does.
    assert!(harness
        .login()
        .execute(
            username("kofi"),
            password("password123"),
            ClientOrigin::default(),
        )
        .await
        .is_err());
    assert!(harness
        .login()
        .execute(
            username("kofi"),
            password("password456"),
            ClientOrigin::default(),
        )
        .await
        .is_ok());
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let harness = Harness::new();
    harness.register_account("kofi", "a@x.com", "password123").await;

    let token = harness.prove_email("a@x.com", VerificationFlow::Reset).await;
    harness
        .reset()
        .execute(token.clone(), password("password456"))
        .await
        .unwrap();

    let replay = harness.reset().execute(token, password("password789")).await;
    assert!(replay.is_err(), "a consumed token must never resolve again");
}
