use secrecy::Secret;
use uuid::Uuid;

use crate::domain::{email::Email, username::Username};

/// A registered account. The password hash is an opaque PHC string owned by
/// the `PasswordHasher` port; the core never inspects it.
#[derive(Debug, Clone)]
pub struct Account {
    id: Uuid,
    username: Username,
    email: Email,
    password_hash: Secret<String>,
    verified: bool,
}

impl Account {
    pub fn new(username: Username, email: Email, password_hash: Secret<String>, verified: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            verified,
        }
    }

    /// Rebuild an account from persisted fields.
    pub fn from_parts(
        id: Uuid,
        username: Username,
        email: Email,
        password_hash: Secret<String>,
        verified: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            verified,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn verified(&self) -> bool {
        self.verified
    }
}
