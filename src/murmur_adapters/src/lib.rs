pub mod config;
pub mod credentials;
pub mod email;
pub mod hashing;
pub mod persistence;

pub use config::{AllowedOrigins, AuthServiceSetting};
pub use credentials::{JwtCodecConfig, JwtCredentialCodec};
pub use email::{MailjetEmailClient, MockEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{
    InMemoryAccountStore, InMemoryCredentialBlacklist, InMemoryEphemeralStore,
    InMemoryPasswordHistoryStore, InMemorySessionStore, PostgresAccountStore,
    PostgresPasswordHistoryStore, PostgresSessionStore, RedisCredentialBlacklist,
    RedisEphemeralStore,
};
