use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use murmur_application::ResetPasswordUseCase;
use murmur_core::{
    AccountStore, CredentialBlacklist, EphemeralStore, Password, PasswordHasher,
    PasswordHistoryStore, SessionStore, SingleUseToken, VerificationFlow,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: Secret<String>,
    pub confirm_new_password: Secret<String>,
    #[serde(rename = "type")]
    pub flow: String,
}

/// Set a new password from a proven reset token. Always ends every session
/// of the account.
#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<S, A, P, H, Se, B>(
    State((token_store, accounts, history, hasher, sessions, blacklist)): State<(
        S,
        A,
        P,
        H,
        Se,
        B,
    )>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: EphemeralStore + 'static,
    A: AccountStore + 'static,
    P: PasswordHistoryStore + 'static,
    H: PasswordHasher + 'static,
    Se: SessionStore + 'static,
    B: CredentialBlacklist + 'static,
{
    if request.flow.parse::<VerificationFlow>()? != VerificationFlow::Reset {
        return Err(ApiError::InvalidInput("Invalid flow type".to_string()));
    }

    if request.new_password.expose_secret() != request.confirm_new_password.expose_secret() {
        return Err(ApiError::InvalidInput("Passwords do not match".to_string()));
    }

    let new_password = Password::try_from(request.new_password)?;
    let token = SingleUseToken::parse(request.token)?;

    let use_case =
        ResetPasswordUseCase::new(token_store, accounts, history, hasher, sessions, blacklist);
    use_case.execute(token, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password reset successfully" })),
    ))
}
