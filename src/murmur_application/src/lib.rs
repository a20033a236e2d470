pub mod use_cases;

pub use use_cases::{
    confirm_verification::{ConfirmVerificationError, ConfirmVerificationUseCase},
    initiate_verification::{InitiateVerificationError, InitiateVerificationUseCase},
    login::{LoginError, LoginOutcome, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    register::{RegisterError, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    revocation::{RevocationCoordinator, RevocationError},
    rotate_session::{RotateSessionError, RotateSessionUseCase, RotatedCredentials},
    single_use_token::{SingleUseTokenIssuer, TokenConsumeError},
    SINGLE_USE_TOKEN_TTL, VERIFICATION_CODE_TTL,
};
