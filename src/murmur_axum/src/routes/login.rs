use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::USER_AGENT, HeaderMap},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use murmur_application::LoginUseCase;
use murmur_core::{
    AccountStore, ClientOrigin, CredentialCodec, Password, PasswordHasher, SessionStore, Username,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    SessionLifetime, client_ip::extract_client_ip, cookies::refresh_cookie, error::ApiError,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

/// Authenticate and open a device session. The access credential travels in
/// the body, the refresh credential only in the cookie.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<A, S, C, H>(
    State((accounts, sessions, codec, hasher, lifetime)): State<(A, S, C, H, SessionLifetime)>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    C: CredentialCodec + 'static,
    H: PasswordHasher + 'static,
{
    let username = Username::try_from(request.username)?;
    let password = Password::try_from(request.password)?;

    let origin = ClientOrigin {
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        ip_address: extract_client_ip(&headers),
    };

    let use_case = LoginUseCase::new(accounts, sessions, codec, hasher, lifetime.as_duration()?);
    let outcome = use_case.execute(username, password, origin).await?;

    let jar = jar.add(refresh_cookie(
        outcome.refresh_credential,
        lifetime.refresh_ttl_in_seconds,
    ));

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({
            "message": "Logged in successfully",
            "username": outcome.username.as_str(),
            "access": outcome.access_credential,
        })),
    ))
}
