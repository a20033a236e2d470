use std::fmt;

use thiserror::Error;

const MIN_USERNAME_LENGTH: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum UsernameError {
    #[error("Username must have at least {MIN_USERNAME_LENGTH} characters")]
    TooShort,
}

/// A display name unique per account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.chars().count() < MIN_USERNAME_LENGTH {
            return Err(UsernameError::TooShort);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_usernames() {
        assert_eq!(
            Username::try_from("ab".to_string()),
            Err(UsernameError::TooShort)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let username = Username::try_from("  kofi  ".to_string()).unwrap();
        assert_eq!(username.as_str(), "kofi");
    }
}
