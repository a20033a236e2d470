pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::Account,
    email::{Email, EmailError},
    otp_code::{OtpCode, OtpCodeError},
    password::{Password, PasswordError},
    session::{ClientOrigin, SessionRecord},
    single_use_token::{SingleUseToken, SingleUseTokenError},
    username::{Username, UsernameError},
    verification_flow::{VerificationFlow, VerificationFlowError},
};

pub use ports::{
    codec::{CredentialCodec, CredentialCodecError, RefreshClaims},
    repositories::{
        AccountStore, AccountStoreError, CredentialBlacklist, CredentialBlacklistError,
        EphemeralStore, EphemeralStoreError, PasswordHistoryStore, PasswordHistoryStoreError,
        SessionRotation, SessionStore, SessionStoreError, PASSWORD_HISTORY_DEPTH,
    },
    services::{EmailClient, PasswordHasher, PasswordHasherError},
};
