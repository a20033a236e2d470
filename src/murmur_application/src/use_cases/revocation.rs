use murmur_core::{
    CredentialBlacklist, CredentialBlacklistError, SessionStore, SessionStoreError,
};
use uuid::Uuid;

/// Error types for revocation operations
#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
    #[error(transparent)]
    Blacklist(#[from] CredentialBlacklistError),
}

/// Dual-layer invalidation: credential blacklist (layer 1) plus session-row
/// revoke (layer 2). Each layer alone is sufficient to block reuse.
pub struct RevocationCoordinator<S, B>
where
    S: SessionStore,
    B: CredentialBlacklist,
{
    sessions: S,
    blacklist: B,
}

impl<S, B> RevocationCoordinator<S, B>
where
    S: SessionStore,
    B: CredentialBlacklist,
{
    pub fn new(sessions: S, blacklist: B) -> Self {
        Self { sessions, blacklist }
    }

    /// Kill a single session. A missing row is success: the operation is
    /// idempotent and must not leak whether a session existed.
    #[tracing::instrument(name = "RevocationCoordinator::revoke_session", skip(self))]
    pub async fn revoke_session(&self, jti: Uuid) -> Result<(), RevocationError> {
        self.blacklist.ban(jti).await?;
        self.sessions.revoke(jti).await?;
        Ok(())
    }

    /// Kill every session of an account.
    ///
    /// Rows are revoked before the blacklist pass: once `revoke_all`
    /// returns, no rotation can slip through on a not-yet-revoked row while
    /// its credential is already blacklisted, or vice versa. A jti rotated
    /// between the collection and `revoke_all` is still dead through its
    /// (revoked) row.
    #[tracing::instrument(name = "RevocationCoordinator::revoke_account", skip(self))]
    pub async fn revoke_account(&self, account_id: Uuid) -> Result<(), RevocationError> {
        let jtis = self.sessions.active_jtis(account_id).await?;
        self.sessions.revoke_all(account_id).await?;
        for jti in jtis {
            self.blacklist.ban(jti).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use murmur_core::{ClientOrigin, SessionRecord, SessionRotation};
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
            _old_jti: Uuid,
            _rotation: SessionRotation,
        ) -> Result<(), SessionStoreError> {
            unimplemented!()
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

    #[tokio::test]
    async fn revoke_session_hits_both_layers() {
        let sessions = MockSessionStore::default();
        let blacklist = MockBlacklist::default();
        let account_id = Uuid::new_v4();
        let jti = Uuid::new_v4();
        sessions.seed(account_id, jti).await;

        let coordinator = RevocationCoordinator::new(sessions.clone(), blacklist.clone());
        coordinator.revoke_session(jti).await.unwrap();

        assert!(blacklist.is_banned(jti).await.unwrap());
        assert!(sessions.records.read().await[0].revoked);
    }

    #[tokio::test]
    async fn revoke_session_is_idempotent_and_silent_on_missing_rows() {
        let coordinator =
            RevocationCoordinator::new(MockSessionStore::default(), MockBlacklist::default());
        let jti = Uuid::new_v4();

        coordinator.revoke_session(jti).await.unwrap();
        coordinator.revoke_session(jti).await.unwrap();
    }

    #[tokio::test]
    async fn revoke_account_leaves_no_active_rows_and_bans_every_jti() {
        let sessions = MockSessionStore::default();
        let blacklist = MockBlacklist::default();
        let account_id = Uuid::new_v4();
        let other_account = Uuid::new_v4();
        let jti_a = Uuid::new_v4();
        let jti_b = Uuid::new_v4();
        let jti_other = Uuid::new_v4();
        sessions.seed(account_id, jti_a).await;
        sessions.seed(account_id, jti_b).await;
        sessions.seed(other_account, jti_other).await;

        let coordinator = RevocationCoordinator::new(sessions.clone(), blacklist.clone());
        coordinator.revoke_account(account_id).await.unwrap();

        assert!(sessions.active_jtis(account_id).await.unwrap().is_empty());
        assert!(blacklist.is_banned(jti_a).await.unwrap());
        assert!(blacklist.is_banned(jti_b).await.unwrap());

        // Other accounts are untouched.
        assert_eq!(sessions.active_jtis(other_account).await.unwrap(), vec![jti_other]);
        assert!(!blacklist.is_banned(jti_other).await.unwrap());
    }
}
