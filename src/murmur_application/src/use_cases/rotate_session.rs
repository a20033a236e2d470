use chrono::{Duration, Utc};
use murmur_core::{
    CredentialBlacklist, CredentialBlacklistError, CredentialCodec, CredentialCodecError,
    RefreshClaims, SessionRecord, SessionRotation, SessionStore, SessionStoreError,
};
use uuid::Uuid;

/// Response from the rotate session use case
#[derive(Debug)]
pub struct RotatedCredentials {
    pub access_credential: String,
    pub refresh_credential: String,
}

/// Error types for the rotate session use case
#[derive(Debug, thiserror::Error)]
pub enum RotateSessionError {
    #[error("Invalid refresh credential")]
    InvalidCredential,
    #[error("Refresh credential revoked or unknown")]
    RevokedOrUnknown,
    #[error(transparent)]
    SessionStore(SessionStoreError),
    #[error(transparent)]
    Blacklist(#[from] CredentialBlacklistError),
    #[error(transparent)]
    Codec(CredentialCodecError),
}

/// Replaces a refresh credential on use, invalidating its predecessor.
///
/// The session store's compare-and-swap is the sole replay-detection point:
/// a reused, logged-out or already-rotated credential no longer matches any
/// active row and is rejected as `RevokedOrUnknown`. That outcome is the
/// replay defense working, not an error to retry.
pub struct RotateSessionUseCase<S, C, B>
where
    S: SessionStore,
    C: CredentialCodec,
    B: CredentialBlacklist,
{
    sessions: S,
    codec: C,
    blacklist: B,
    refresh_lifetime: Duration,
}

impl<S, C, B> RotateSessionUseCase<S, C, B>
where
    S: SessionStore,
    C: CredentialCodec,
    B: CredentialBlacklist,
{
    pub fn new(sessions: S, codec: C, blacklist: B, refresh_lifetime: Duration) -> Self {
        Self {
            sessions,
            codec,
            blacklist,
            refresh_lifetime,
        }
    }

    /// Execute the rotate session use case
    #[tracing::instrument(name = "RotateSessionUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        old_credential: &str,
    ) -> Result<RotatedCredentials, RotateSessionError> {
        let claims = self
            .codec
            .verify_refresh(old_credential)
            .map_err(|_| RotateSessionError::InvalidCredential)?;

        if self.blacklist.is_banned(claims.jti).await? {
            return Err(RotateSessionError::RevokedOrUnknown);
        }

        let new_jti = Uuid::new_v4();
        let expires_at = Utc::now() + self.refresh_lifetime;

        let refresh_credential = self
            .codec
            .mint_refresh(&RefreshClaims {
                account_id: claims.account_id,
                jti: new_jti,
                expires_at,
            })
            .map_err(RotateSessionError::Codec)?;

        // Claim the row. If a concurrent rotation, logout or bulk revoke got
        // there first, zero rows match and the credential is dead.
        self.sessions
            .rotate(
                claims.jti,
                SessionRotation {
                    new_jti,
                    credential_fingerprint: SessionRecord::fingerprint(&refresh_credential),
                    expires_at,
                },
            )
            .await
            .map_err(|e| match e {
                SessionStoreError::RevokedOrUnknown => RotateSessionError::RevokedOrUnknown,
                other => RotateSessionError::SessionStore(other),
            })?;

        let access_credential = self
            .codec
            .mint_access(claims.account_id)
            .map_err(RotateSessionError::Codec)?;

        Ok(RotatedCredentials {
            access_credential,
            refresh_credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::ClientOrigin;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[derive(Clone, Default)]
    struct MockSessionStore {
        records: Arc<RwLock<Vec<SessionRecord>>>,
    }

    impl MockSessionStore {
        async fn seed(&self, account_id: Uuid, jti: Uuid) {
            self.records.write().await.push(SessionRecord::open(
                account_id,
                jti,
                SessionRecord::fingerprint("seed"),
                ClientOrigin::default(),
                Duration::days(7),
            ));
        }
    }

    #[async_trait::async_trait]
    impl SessionStore for MockSessionStore {
        async fn insert(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
            self.records.write().await.push(record);
            Ok(())
        }

        async fn rotate(
            &self,
            old_jti: Uuid,
            rotation: SessionRotation,
        ) -> Result<(), SessionStoreError> {
            let mut records = self.records.write().await;
            let now = Utc::now();
            let record = records
                .iter_mut()
                .find(|r| r.jti == old_jti && !r.revoked && r.expires_at > now)
                .ok_or(SessionStoreError::RevokedOrUnknown)?;
            record.jti = rotation.new_jti;
            record.credential_fingerprint = rotation.credential_fingerprint;
            record.expires_at = rotation.expires_at;
            record.last_used = now;
            Ok(())
        }

        async fn revoke(&self, jti: Uuid) -> Result<(), SessionStoreError> {
            let mut records = self.records.write().await;
            if let Some(record) = records.iter_mut().find(|r| r.jti == jti) {
                record.revoked = true;
            }
            Ok(())
        }

        async fn active_jtis(&self, account_id: Uuid) -> Result<Vec<Uuid>, SessionStoreError> {
            Ok(self
                .records
                .read()
                .await
                .iter()
                .filter(|r| r.account_id == account_id && !r.revoked)
                .map(|r| r.jti)
                .collect())
        }

        async fn revoke_all(&self, account_id: Uuid) -> Result<(), SessionStoreError> {
            let mut records = self.records.write().await;
            for record in records.iter_mut().filter(|r| r.account_id == account_id) {
                record.revoked = true;
            }
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockBlacklist {
        banned: Arc<RwLock<HashSet<Uuid>>>,
    }

    #[async_trait::async_trait]
    impl CredentialBlacklist for MockBlacklist {
        async fn ban(&self, jti: Uuid) -> Result<(), CredentialBlacklistError> {
            self.banned.write().await.insert(jti);
            Ok(())
        }

        async fn is_banned(&self, jti: Uuid) -> Result<bool, CredentialBlacklistError> {
            Ok(self.banned.read().await.contains(&jti))
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

    fn use_case(
        sessions: MockSessionStore,
        blacklist: MockBlacklist,
    ) -> RotateSessionUseCase<MockSessionStore, MockCodec, MockBlacklist> {
        RotateSessionUseCase::new(sessions, MockCodec, blacklist, Duration::days(7))
    }

    #[tokio::test]
    async fn rotation_moves_the_row_and_kills_the_old_credential() {
        let sessions = MockSessionStore::default();
        let account_id = Uuid::new_v4();
        let jti = Uuid::new_v4();
        sessions.seed(account_id, jti).await;

        let use_case = use_case(sessions.clone(), MockBlacklist::default());
        let old_credential = format!("refresh:{account_id}:{jti}");

        let rotated = use_case.execute(&old_credential).await.unwrap();

        // Same row, new jti.
        let records = sessions.records.read().await;
        assert_eq!(records.len(), 1);
        assert_ne!(records[0].jti, jti);
        assert_eq!(
            records[0].credential_fingerprint,
            SessionRecord::fingerprint(&rotated.refresh_credential)
        );
        drop(records);

        // Replaying the old credential fails; the rotated one works.
        let replay = use_case.execute(&old_credential).await;
        assert!(matches!(replay, Err(RotateSessionError::RevokedOrUnknown)));
        assert!(use_case.execute(&rotated.refresh_credential).await.is_ok());
    }

    #[tokio::test]
    async fn garbage_credential_is_invalid_not_revoked() {
        let use_case = use_case(MockSessionStore::default(), MockBlacklist::default());
        let result = use_case.execute("not-a-credential").await;
        assert!(matches!(result, Err(RotateSessionError::InvalidCredential)));
    }

    #[tokio::test]
    async fn blacklisted_jti_is_rejected_even_with_an_active_row() {
        let sessions = MockSessionStore::default();
        let blacklist = MockBlacklist::default();
        let account_id = Uuid::new_v4();
        let jti = Uuid::new_v4();
        sessions.seed(account_id, jti).await;
        blacklist.ban(jti).await.unwrap();

        let use_case = use_case(sessions, blacklist);
        let result = use_case.execute(&format!("refresh:{account_id}:{jti}")).await;
        assert!(matches!(result, Err(RotateSessionError::RevokedOrUnknown)));
    }

    #[tokio::test]
    async fn revoked_row_is_rejected() {
        let sessions = MockSessionStore::default();
        let account_id = Uuid::new_v4();
        let jti = Uuid::new_v4();
        sessions.seed(account_id, jti).await;
        sessions.revoke(jti).await.unwrap();

        let use_case = use_case(sessions, MockBlacklist::default());
        let result = use_case.execute(&format!("refresh:{account_id}:{jti}")).await;
        assert!(matches!(result, Err(RotateSessionError::RevokedOrUnknown)));
    }
}
