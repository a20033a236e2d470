use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;

const CODE_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum OtpCodeError {
    #[error("Verification code must be {CODE_LENGTH} digits")]
    InvalidFormat,
}

/// A one-time numeric code proving control of an email address.
///
/// Only the salted hash ever reaches a store; the raw digits go out in the
/// verification email and come back from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a random 6-digit code, zero-padded.
    pub fn random() -> Self {
        let n: u32 = rand::rng().random_range(0..1_000_000);
        Self(format!("{n:06}"))
    }

    pub fn parse(input: String) -> Result<Self, OtpCodeError> {
        if input.len() != CODE_LENGTH || !input.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidFormat);
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Salted SHA-256 hex digest, the only form a store may hold.
    pub fn hashed(&self, salt: &str) -> String {
        let digest = Sha256::digest(format!("{salt}{}", self.0).as_bytes());
        format!("{digest:x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn random_codes_are_six_digits() {
        for _ in 0..100 {
            let code = OtpCode::random();
            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert_eq!(
            OtpCode::parse("12a456".to_string()),
            Err(OtpCodeError::InvalidFormat)
        );
        assert_eq!(
            OtpCode::parse("12345".to_string()),
            Err(OtpCodeError::InvalidFormat)
        );
    }

    #[test]
    fn hash_depends_on_salt_and_code() {
        let code = OtpCode::parse("123456".to_string()).unwrap();
        let other = OtpCode::parse("654321".to_string()).unwrap();
        assert_eq!(code.hashed("salt"), code.hashed("salt"));
        assert_ne!(code.hashed("salt"), code.hashed("pepper"));
        assert_ne!(code.hashed("salt"), other.hashed("salt"));
    }

    #[quickcheck]
    fn any_six_digit_string_parses(n: u32) -> bool {
        OtpCode::parse(format!("{:06}", n % 1_000_000)).is_ok()
    }
}
