use murmur_core::{SessionRecord, SessionRotation, SessionStore, SessionStoreError};
use sqlx::{PgPool, Pool, Postgres, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresSessionStore { pool }
    }
}

#[async_trait::async_trait]
impl SessionStore for PostgresSessionStore {
    #[tracing::instrument(name = "Inserting refresh session into PostgreSQL", skip_all)]
    async fn insert(&self, record: SessionRecord) -> Result<(), SessionStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO refresh_sessions
                    (id, account_id, jti, credential_fingerprint, user_agent, ip_address,
                     created_at, last_used, expires_at, revoked)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(record.jti)
        .bind(&record.credential_fingerprint)
        .bind(&record.user_agent)
        .bind(&record.ip_address)
        .bind(record.created_at)
        .bind(record.last_used)
        .bind(record.expires_at)
        .bind(record.revoked);

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint() == Some("refresh_sessions_jti_key") {
                    return SessionStoreError::DuplicateJti;
                }
            }
            SessionStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Rotating refresh session in PostgreSQL", skip_all)]
    async fn rotate(
        &self,
        old_jti: Uuid,
        rotation: SessionRotation,
    ) -> Result<(), SessionStoreError> {
        // The WHERE clause is the compare-and-swap: the row is claimed only
        // while it still carries the old jti, is unrevoked and unexpired.
        // A concurrent rotation that won the race leaves nothing to match.
        let result = sqlx::query(
            r#"
                UPDATE refresh_sessions
                SET jti = $1,
                    credential_fingerprint = $2,
                    expires_at = $3,
                    last_used = now()
                WHERE jti = $4
                  AND revoked = FALSE
                  AND expires_at > now()
            "#,
        )
        .bind(rotation.new_jti)
        .bind(&rotation.credential_fingerprint)
        .bind(rotation.expires_at)
        .bind(old_jti)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SessionStoreError::RevokedOrUnknown);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Revoking refresh session in PostgreSQL", skip_all)]
    async fn revoke(&self, jti: Uuid) -> Result<(), SessionStoreError> {
        // Zero affected rows is fine: revoke is idempotent.
        sqlx::query(
            r#"
                UPDATE refresh_sessions
                SET revoked = TRUE
                WHERE jti = $1
            "#,
        )
        .bind(jti)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Listing active session ids in PostgreSQL", skip_all)]
    async fn active_jtis(&self, account_id: Uuid) -> Result<Vec<Uuid>, SessionStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT jti
                FROM refresh_sessions
                WHERE account_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("jti")
                    .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))
            })
            .collect()
    }

    #[tracing::instrument(name = "Revoking all sessions of account in PostgreSQL", skip_all)]
    async fn revoke_all(&self, account_id: Uuid) -> Result<(), SessionStoreError> {
        sqlx::query(
            r#"
                UPDATE refresh_sessions
                SET revoked = TRUE
                WHERE account_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
