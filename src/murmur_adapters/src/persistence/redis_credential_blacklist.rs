use std::sync::Arc;

use murmur_core::{CredentialBlacklist, CredentialBlacklistError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Redis-backed credential blacklist keyed by `jti`.
///
/// Entries live exactly as long as a refresh credential possibly could, so
/// the set cannot grow without bound.
#[derive(Clone)]
pub struct RedisCredentialBlacklist {
    conn: Arc<RwLock<Connection>>,
    entry_ttl: u64,
}

impl RedisCredentialBlacklist {
    pub fn new(conn: Arc<RwLock<Connection>>, entry_ttl: u64) -> Self {
        Self { conn, entry_ttl }
    }
}

#[async_trait::async_trait]
impl CredentialBlacklist for RedisCredentialBlacklist {
    async fn ban(&self, jti: Uuid) -> Result<(), CredentialBlacklistError> {
        let key = get_key(jti);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, self.entry_ttl)
            .map_err(|e| CredentialBlacklistError::StoreError(e.to_string()))
    }

    async fn is_banned(&self, jti: Uuid) -> Result<bool, CredentialBlacklistError> {
        let key = get_key(jti);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| CredentialBlacklistError::StoreError(e.to_string()))
    }
}

// We are using a key prefix to prevent collisions and organize data!
const REVOKED_JTI_KEY_PREFIX: &str = "revoked_jti:";

fn get_key(jti: Uuid) -> String {
    format!("{}{}", REVOKED_JTI_KEY_PREFIX, jti)
}
