use std::sync::Arc;
use std::time::Duration;

use murmur_core::{EphemeralStore, EphemeralStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Redis-backed ephemeral store. Keys expire server-side via `EX`; there is
/// no sweeper on our end.
#[derive(Clone)]
pub struct RedisEphemeralStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisEphemeralStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl EphemeralStore for RedisEphemeralStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), EphemeralStoreError> {
        let mut conn = self.conn.write().await;
        conn.set_ex(key, value, ttl.as_secs())
            .map_err(|e| EphemeralStoreError::StoreError(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, EphemeralStoreError> {
        let mut conn = self.conn.write().await;
        conn.get(key)
            .map_err(|e| EphemeralStoreError::StoreError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), EphemeralStoreError> {
        let mut conn = self.conn.write().await;
        conn.del(key)
            .map_err(|e| EphemeralStoreError::StoreError(e.to_string()))
    }

    async fn take(&self, key: &str) -> Result<Option<String>, EphemeralStoreError> {
        let mut conn = self.conn.write().await;
        // GETDEL is one round trip, so two racing consumers can never both
        // see the value.
        redis::cmd("GETDEL")
            .arg(key)
            .query(&mut *conn)
            .map_err(|e| EphemeralStoreError::StoreError(e.to_string()))
    }
}
