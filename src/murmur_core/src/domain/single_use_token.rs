use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use thiserror::Error;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum SingleUseTokenError {
    #[error("Malformed token")]
    InvalidFormat,
}

/// An opaque, high-entropy string binding a verified email to a follow-up
/// step (registration or password reset). Consumable exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleUseToken(String);

impl SingleUseToken {
    /// 32 random bytes, URL-safe base64 without padding.
    pub fn random() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn parse(input: String) -> Result<Self, SingleUseTokenError> {
        let decoded = URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| SingleUseTokenError::InvalidFormat)?;
        if decoded.len() != TOKEN_BYTES {
            return Err(SingleUseTokenError::InvalidFormat);
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tokens_round_trip() {
        let token = SingleUseToken::random();
        assert_eq!(
            SingleUseToken::parse(token.as_str().to_string()),
            Ok(token)
        );
    }

    #[test]
    fn random_tokens_are_unique() {
        assert_ne!(SingleUseToken::random(), SingleUseToken::random());
    }

    #[test]
    fn parse_rejects_short_or_invalid_input() {
        assert!(SingleUseToken::parse("short".to_string()).is_err());
        assert!(SingleUseToken::parse("not base64!!".to_string()).is_err());
    }
}
