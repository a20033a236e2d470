use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use murmur_application::ConfirmVerificationUseCase;
use murmur_core::{Email, EphemeralStore, OtpCode, VerificationFlow};
use secrecy::Secret;
use serde::Deserialize;

use crate::{VerificationConfig, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: Secret<String>,
    #[serde(rename = "type")]
    pub flow: String,
    pub code: String,
}

/// Check a submitted one-time code and hand back a single-use token.
#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<S>(
    State((store, config)): State<(S, VerificationConfig)>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: EphemeralStore + Clone + 'static,
{
    let flow: VerificationFlow = request.flow.parse()?;
    let email = Email::try_from(request.email)?;
    let code = OtpCode::parse(request.code)?;

    let use_case = ConfirmVerificationUseCase::new(store, config.otp_salt);
    let token = use_case.execute(email, flow, code).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Email successfully verified",
            "verified": true,
            "token": token.as_str(),
        })),
    ))
}
