use std::collections::HashSet;
use std::sync::Arc;

use murmur_core::{CredentialBlacklist, CredentialBlacklistError};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct InMemoryCredentialBlacklist {
    banned: Arc<RwLock<HashSet<Uuid>>>,
}

impl InMemoryCredentialBlacklist {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialBlacklist for InMemoryCredentialBlacklist {
    async fn ban(&self, jti: Uuid) -> Result<(), CredentialBlacklistError> {
        self.banned.write().await.insert(jti);
        Ok(())
    }

    async fn is_banned(&self, jti: Uuid) -> Result<bool, CredentialBlacklistError> {
        Ok(self.banned.read().await.contains(&jti))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ban_is_idempotent() {
        let blacklist = InMemoryCredentialBlacklist::new();
        let jti = Uuid::new_v4();

        blacklist.ban(jti).await.unwrap();
        blacklist.ban(jti).await.unwrap();

        assert!(blacklist.is_banned(jti).await.unwrap());
        assert!(!blacklist.is_banned(Uuid::new_v4()).await.unwrap());
    }
}
