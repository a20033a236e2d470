pub mod jwt_credential_codec;

pub use jwt_credential_codec::{JwtCodecConfig, JwtCredentialCodec};
