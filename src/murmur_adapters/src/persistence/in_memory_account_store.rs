use std::sync::Arc;

use murmur_core::{Account, AccountStore, AccountStoreError, Email, Username};
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.username() == account.username()) {
            return Err(AccountStoreError::UsernameTaken);
        }
        if accounts.iter().any(|a| a.email() == account.email()) {
            return Err(AccountStoreError::EmailTaken);
        }
        accounts.push(account);
        Ok(())
    }

    async fn get_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn get_by_username(&self, username: &Username) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.username() == username)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn email_taken(&self, email: &Email) -> Result<bool, AccountStoreError> {
        Ok(self.accounts.read().await.iter().any(|a| a.email() == email))
    }

    async fn username_taken(&self, username: &Username) -> Result<bool, AccountStoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .any(|a| a.username() == username))
    }

    async fn set_password_hash(
        &self,
        account_id: Uuid,
        password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| a.id() == account_id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        *account = Account::from_parts(
            account.id(),
            account.username().clone(),
            account.email().clone(),
            password_hash,
            account.verified(),
        );
        Ok(())
    }
}
