use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use murmur_application::InitiateVerificationUseCase;
use murmur_core::{AccountStore, Email, EmailClient, EphemeralStore, VerificationFlow};
use secrecy::Secret;
use serde::Deserialize;

use crate::{VerificationConfig, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SendVerificationRequest {
    pub email: Secret<String>,
    #[serde(rename = "type")]
    pub flow: String,
}

/// Start an email-ownership proof for registration or password reset.
#[tracing::instrument(name = "Send verification", skip_all)]
pub async fn send_verification<S, A, E>(
    State((store, accounts, email_client, config)): State<(S, A, E, VerificationConfig)>,
    Json(request): Json<SendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: EphemeralStore + 'static,
    A: AccountStore + 'static,
    E: EmailClient + 'static,
{
    let flow: VerificationFlow = request.flow.parse()?;
    let email = Email::try_from(request.email)?;

    let use_case =
        InitiateVerificationUseCase::new(store, accounts, email_client, config.otp_salt);
    use_case.execute(email, flow).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Email verification sent" })),
    ))
}
