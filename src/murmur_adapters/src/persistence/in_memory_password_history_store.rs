use std::collections::HashMap;
use std::sync::Arc;

use murmur_core::{PasswordHistoryStore, PasswordHistoryStoreError, PASSWORD_HISTORY_DEPTH};
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory history store. Entries are kept oldest-first per account and
/// trimmed on insert, mirroring the Postgres adapter's eviction.
#[derive(Default, Clone)]
pub struct InMemoryPasswordHistoryStore {
    hashes: Arc<RwLock<HashMap<Uuid, Vec<Secret<String>>>>>,
}

impl InMemoryPasswordHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PasswordHistoryStore for InMemoryPasswordHistoryStore {
    async fn recent_hashes(
        &self,
        account_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Secret<String>>, PasswordHistoryStoreError> {
        Ok(self
            .hashes
            .read()
            .await
            .get(&account_id)
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn record_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), PasswordHistoryStoreError> {
        let mut hashes = self.hashes.write().await;
        let entries = hashes.entry(account_id).or_default();
        entries.push(password_hash);
        if entries.len() > PASSWORD_HISTORY_DEPTH {
            entries.remove(0);
        }
        Ok(())
    }
}
