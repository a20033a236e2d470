pub mod in_memory_account_store;
pub mod in_memory_credential_blacklist;
pub mod in_memory_ephemeral_store;
pub mod in_memory_password_history_store;
pub mod in_memory_session_store;
pub mod postgres_account_store;
pub mod postgres_password_history_store;
pub mod postgres_session_store;
pub mod redis_credential_blacklist;
pub mod redis_ephemeral_store;

pub use in_memory_account_store::InMemoryAccountStore;
pub use in_memory_credential_blacklist::InMemoryCredentialBlacklist;
pub use in_memory_ephemeral_store::InMemoryEphemeralStore;
pub use in_memory_password_history_store::InMemoryPasswordHistoryStore;
pub use in_memory_session_store::InMemorySessionStore;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_password_history_store::PostgresPasswordHistoryStore;
pub use postgres_session_store::PostgresSessionStore;
pub use redis_credential_blacklist::RedisCredentialBlacklist;
pub use redis_ephemeral_store::RedisEphemeralStore;
