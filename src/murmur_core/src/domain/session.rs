use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Where a session was opened from. Best effort, audit only.
#[derive(Debug, Clone, Default)]
pub struct ClientOrigin {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// One row per device/browser lineage.
///
/// The row is created at login and then mutated in place on every rotation:
/// `jti`, fingerprint and expiry move forward, the row id stays. `revoked`
/// flips false to true exactly once and the row is retained for audit.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub jti: Uuid,
    pub credential_fingerprint: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl SessionRecord {
    pub fn open(
        account_id: Uuid,
        jti: Uuid,
        credential_fingerprint: String,
        origin: ClientOrigin,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            jti,
            credential_fingerprint,
            user_agent: origin.user_agent,
            ip_address: origin.ip_address,
            created_at: now,
            last_used: now,
            expires_at: now + lifetime,
            revoked: false,
        }
    }

    /// SHA-256 hex of a raw credential. The row never holds the credential
    /// itself.
    pub fn fingerprint(raw_credential: &str) -> String {
        let digest = Sha256::digest(raw_credential.as_bytes());
        format!("{digest:x}")
    }
}
