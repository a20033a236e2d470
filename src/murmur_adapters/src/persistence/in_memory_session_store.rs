use std::sync::Arc;

use chrono::Utc;
use murmur_core::{SessionRecord, SessionRotation, SessionStore, SessionStoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory session store. The write lock serializes `rotate`, giving the
/// same claim-exactly-once guarantee the Postgres adapter gets from its
/// conditional UPDATE.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<Vec<SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for assertions in tests.
    pub async fn records(&self) -> Vec<SessionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.jti == record.jti) {
            return Err(SessionStoreError::DuplicateJti);
        }
        records.push(record);
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
