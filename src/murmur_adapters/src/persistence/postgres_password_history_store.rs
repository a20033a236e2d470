use murmur_core::{PasswordHistoryStore, PasswordHistoryStoreError, PASSWORD_HISTORY_DEPTH};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresPasswordHistoryStore {
    pool: PgPool,
}

impl PostgresPasswordHistoryStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresPasswordHistoryStore { pool }
    }
}

#[async_trait::async_trait]
impl PasswordHistoryStore for PostgresPasswordHistoryStore {
    #[tracing::instrument(name = "Loading password history from PostgreSQL", skip_all)]
    async fn recent_hashes(
        &self,
        account_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Secret<String>>, PasswordHistoryStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT password_hash
                FROM previous_passwords
                WHERE account_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("password_hash")
                    .map(Secret::from)
                    .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))
            })
            .collect()
    }

    #[tracing::instrument(name = "Recording password hash in PostgreSQL", skip_all)]
    async fn record_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), PasswordHistoryStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))?;

        sqlx::query(
            r#"
                INSERT INTO previous_passwords (account_id, password_hash)
                VALUES ($1, $2)
            "#,
        )
        .bind(account_id)
        .bind(password_hash.expose_secret())
        .execute(&mut *tx)
        .await
        .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))?;

        // Keep only the newest entries; anything older falls off.
        sqlx::query(
            r#"
                DELETE FROM previous_passwords
                WHERE account_id = $1
                  AND id NOT IN (
                      SELECT id
                      FROM previous_passwords
                      WHERE account_id = $1
                      ORDER BY created_at DESC, id DESC
                      LIMIT $2
                  )
            "#,
        )
        .bind(account_id)
        .bind(PASSWORD_HISTORY_DEPTH as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| PasswordHistoryStoreError::UnexpectedError(e.to_string()))
    }
}
