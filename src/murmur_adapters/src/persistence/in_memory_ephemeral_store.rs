use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use murmur_core::{EphemeralStore, EphemeralStoreError};

/// In-memory ephemeral store for tests and local runs.
///
/// Expiry is passive, exactly like the Redis adapter: entries carry a
/// deadline and are dropped lazily when read past it.
#[derive(Clone, Default)]
pub struct InMemoryEphemeralStore {
    entries: Arc<DashMap<String, (String, Instant)>>,
}

impl InMemoryEphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EphemeralStore for InMemoryEphemeralStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), EphemeralStoreError> {
        self.entries
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, EphemeralStoreError> {
        if let Some(entry) = self.entries.get(key) {
            let (value, deadline) = entry.value().clone();
            drop(entry);
            if deadline > Instant::now() {
                return Ok(Some(value));
            }
            self.entries.remove(key);
        }
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), EphemeralStoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, EphemeralStoreError> {
        // DashMap::remove is atomic: of two racing takers exactly one gets
        // the entry.
        Ok(self
            .entries
            .remove(key)
            .filter(|(_, (_, deadline))| *deadline > Instant::now())
            .map(|(_, (value, _))| value))
    }
}
