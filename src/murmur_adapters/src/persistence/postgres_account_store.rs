use murmur_core::{Account, AccountStore, AccountStoreError, Email, Username};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }

    fn account_from_row(row: &sqlx::postgres::PgRow) -> Result<Account, AccountStoreError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let verified: bool = row
            .try_get("verified")
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let username = Username::try_from(username)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let email = Email::try_from(Secret::from(email))
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(Account::from_parts(
            id,
            username,
            email,
            Secret::from(password_hash),
            verified,
        ))
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts (id, username, email, password_hash, verified)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id())
        .bind(account.username().as_str())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.password_hash().expose_secret())
        .bind(account.verified());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                match db_err.constraint() {
                    Some("accounts_username_key") => return AccountStoreError::UsernameTaken,
                    Some("accounts_email_key") => return AccountStoreError::EmailTaken,
                    _ => {}
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, username, email, password_hash, verified
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        Self::account_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving account by username from PostgreSQL", skip_all)]
    async fn get_by_username(&self, username: &Username) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, username, email, password_hash, verified
                FROM accounts
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        Self::account_from_row(&row)
    }

    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError> {
        let row = sqlx::query(r#"SELECT 1 AS one FROM accounts WHERE email = $1"#)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(row.is_some())
    }

    #[tracing::instrument(name = "Checking username in PostgreSQL", skip_all)]
    async fn username_taken(&self, username: &Username) -> Result<bool, AccountStoreError> {
        let row = sqlx::query(r#"SELECT 1 AS one FROM accounts WHERE username = $1"#)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(row.is_some())
    }

    #[tracing::instrument(name = "Setting new password hash in PostgreSQL", skip_all)]
    async fn set_password_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }
}
