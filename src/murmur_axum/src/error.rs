use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use murmur_application::{
    ConfirmVerificationError, InitiateVerificationError, LoginError, LogoutError, RegisterError,
    ResetPasswordError, RotateSessionError,
};
use murmur_core::{
    EmailError, OtpCodeError, PasswordError, SingleUseTokenError, UsernameError,
    VerificationFlowError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("No refresh token provided")]
    MissingRefreshCredential,

    #[error("{0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Failed to send email. Try again later")]
    DeliveryFailed,

    #[error("Service temporarily unavailable")]
    DependencyError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::InvalidInput(_) | ApiError::MissingRefreshCredential => {
                StatusCode::BAD_REQUEST
            }

            ApiError::Conflict(_) => StatusCode::CONFLICT,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            ApiError::DeliveryFailed | ApiError::DependencyError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        if let ApiError::DependencyError(detail) = &self {
            tracing::error!("dependency failure: {detail}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UsernameError> for ApiError {
    fn from(error: UsernameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<OtpCodeError> for ApiError {
    fn from(error: OtpCodeError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<VerificationFlowError> for ApiError {
    fn from(error: VerificationFlowError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SingleUseTokenError> for ApiError {
    fn from(_: SingleUseTokenError) -> Self {
        // A malformed token and an unknown token must be indistinguishable.
        ApiError::AuthenticationError("Session expired or invalid token".to_string())
    }
}

impl From<InitiateVerificationError> for ApiError {
    fn from(error: InitiateVerificationError) -> Self {
        match error {
            InitiateVerificationError::EmailAlreadyRegistered
            | InitiateVerificationError::AlreadyPending => ApiError::Conflict(error.to_string()),
            InitiateVerificationError::AccountNotFound => ApiError::NotFound(error.to_string()),
            InitiateVerificationError::DeliveryFailed => ApiError::DeliveryFailed,
            InitiateVerificationError::EphemeralStore(e) => ApiError::DependencyError(e.to_string()),
            InitiateVerificationError::AccountStore(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}

impl From<ConfirmVerificationError> for ApiError {
    fn from(error: ConfirmVerificationError) -> Self {
        match error {
            ConfirmVerificationError::Expired | ConfirmVerificationError::InvalidCode => {
                ApiError::AuthenticationError(error.to_string())
            }
            ConfirmVerificationError::EphemeralStore(e) => {
                ApiError::DependencyError(e.to_string())
            }
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UsernameTaken => ApiError::Conflict(error.to_string()),
            RegisterError::TokenInvalid => ApiError::AuthenticationError(error.to_string()),
            RegisterError::EphemeralStore(e) => ApiError::DependencyError(e.to_string()),
            RegisterError::AccountStore(e) => ApiError::DependencyError(e.to_string()),
            RegisterError::Hasher(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::AuthenticationError(error.to_string()),
            LoginError::AccountStore(e) => ApiError::DependencyError(e.to_string()),
            LoginError::SessionStore(e) => ApiError::DependencyError(e.to_string()),
            LoginError::Codec(e) => ApiError::DependencyError(e.to_string()),
            LoginError::Hasher(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}

impl From<RotateSessionError> for ApiError {
    fn from(error: RotateSessionError) -> Self {
        match error {
            RotateSessionError::InvalidCredential | RotateSessionError::RevokedOrUnknown => {
                ApiError::AuthenticationError(error.to_string())
            }
            RotateSessionError::SessionStore(e) => ApiError::DependencyError(e.to_string()),
            RotateSessionError::Blacklist(e) => ApiError::DependencyError(e.to_string()),
            RotateSessionError::Codec(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::InvalidCredential => ApiError::AuthenticationError(error.to_string()),
            LogoutError::Revocation(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::TokenInvalid => ApiError::AuthenticationError(error.to_string()),
            ResetPasswordError::AccountNotFound => ApiError::NotFound(error.to_string()),
            ResetPasswordError::PasswordReused => ApiError::Conflict(error.to_string()),
            ResetPasswordError::EphemeralStore(e) => ApiError::DependencyError(e.to_string()),
            ResetPasswordError::AccountStore(e) => ApiError::DependencyError(e.to_string()),
            ResetPasswordError::History(e) => ApiError::DependencyError(e.to_string()),
            ResetPasswordError::Hasher(e) => ApiError::DependencyError(e.to_string()),
            ResetPasswordError::Revocation(e) => ApiError::DependencyError(e.to_string()),
        }
    }
}
