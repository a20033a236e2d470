use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use murmur_core::{CredentialCodec, CredentialCodecError, RefreshClaims};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

#[derive(Clone)]
pub struct JwtCodecConfig {
    pub jwt_secret: Secret<String>,
    pub access_ttl_in_seconds: i64,
}

impl JwtCodecConfig {
    fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 credential codec. Access and refresh credentials share the secret
/// but carry a `token_type` discriminator so one can never pass as the
/// other.
#[derive(Clone)]
pub struct JwtCredentialCodec {
    config: JwtCodecConfig,
}

impl JwtCredentialCodec {
    pub fn new(config: JwtCodecConfig) -> Self {
        Self { config }
    }
}

impl CredentialCodec for JwtCredentialCodec {
    fn mint_access(&self, account_id: Uuid) -> Result<String, CredentialCodecError> {
        let delta = chrono::Duration::try_seconds(self.config.access_ttl_in_seconds).ok_or(
            CredentialCodecError::MintError("Failed to create access token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(CredentialCodecError::MintError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let claims = AccessTokenClaims {
            sub: account_id.to_string(),
            exp: as_exp(exp)?,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        create_token(&claims, self.config.as_bytes())
    }

    fn mint_refresh(&self, claims: &RefreshClaims) -> Result<String, CredentialCodecError> {
        let claims = RefreshTokenClaims {
            sub: claims.account_id.to_string(),
            jti: claims.jti.to_string(),
            exp: as_exp(claims.expires_at.timestamp())?,
            token_type: REFRESH_TOKEN_TYPE.to_string(),
        };

        create_token(&claims, self.config.as_bytes())
    }

    fn verify_refresh(&self, credential: &str) -> Result<RefreshClaims, CredentialCodecError> {
        let claims = decode::<RefreshTokenClaims>(
            credential,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| CredentialCodecError::InvalidCredential)?;

        if claims.token_type != REFRESH_TOKEN_TYPE {
            return Err(CredentialCodecError::InvalidCredential);
        }

        let account_id = claims
            .sub
            .parse()
            .map_err(|_| CredentialCodecError::InvalidCredential)?;
        let jti = claims
            .jti
            .parse()
            .map_err(|_| CredentialCodecError::InvalidCredential)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
            .ok_or(CredentialCodecError::InvalidCredential)?;

        Ok(RefreshClaims {
            account_id,
            jti,
            expires_at,
        })
    }
}

fn as_exp(timestamp: i64) -> Result<usize, CredentialCodecError> {
    timestamp
        .try_into()
        .map_err(|_| CredentialCodecError::MintError("Failed to cast i64 to usize".to_string()))
}

fn create_token<T: Serialize>(claims: &T, secret: &[u8]) -> Result<String, CredentialCodecError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| CredentialCodecError::MintError(e.to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    sub: String,
    exp: usize,
    token_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshTokenClaims {
    sub: String,
    jti: String,
    exp: usize,
    token_type: String,
}
