use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use murmur_application::RegisterUseCase;
use murmur_core::{
    AccountStore, EphemeralStore, Password, PasswordHasher, SingleUseToken, Username,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: Secret<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Secret<String>,
    pub token: String,
}

/// Create an account from a verified-email token.
#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, S, H>(
    State((accounts, token_store, hasher)): State<(A, S, H)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    S: EphemeralStore + 'static,
    H: PasswordHasher + 'static,
{
    if request.password.expose_secret() != request.confirm_password.expose_secret() {
        return Err(ApiError::InvalidInput("Passwords do not match".to_string()));
    }

    let username = Username::try_from(request.username)?;
    let password = Password::try_from(request.password)?;
    let token = SingleUseToken::parse(request.token)?;

    let use_case = RegisterUseCase::new(accounts, token_store, hasher);
    use_case.execute(username, password, token).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Account created successfully! Login to continue."
        })),
    ))
}
