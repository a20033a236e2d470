pub mod auth_service;
pub mod tracing;

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

pub use auth_service::AuthService;

/// Connect to PostgreSQL and bring the schema up to date.
pub async fn configure_postgresql(url: &Secret<String>) -> Result<PgPool, sqlx::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    Ok(pg_pool)
}

pub fn get_redis_client(redis_host_name: &str) -> redis::RedisResult<redis::Client> {
    let redis_url = format!("redis://{redis_host_name}/");
    redis::Client::open(redis_url)
}

/// Open a shared Redis connection for the ephemeral store and the
/// credential blacklist.
pub fn configure_redis(
    redis_host_name: &str,
) -> redis::RedisResult<Arc<RwLock<redis::Connection>>> {
    let client = get_redis_client(redis_host_name)?;
    Ok(Arc::new(RwLock::new(client.get_connection()?)))
}
