use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use murmur_application::RotateSessionUseCase;
use murmur_core::{CredentialBlacklist, CredentialCodec, SessionStore};

use crate::{
    SessionLifetime,
    cookies::{REFRESH_COOKIE_NAME, refresh_cookie},
    error::ApiError,
};

/// Rotate the refresh credential and mint a fresh access credential.
///
/// A replayed, logged-out or already-rotated cookie fails here with 401;
/// the client restarts from login.
#[tracing::instrument(name = "Refresh session", skip_all)]
pub async fn refresh_session<S, C, B>(
    State((sessions, codec, blacklist, lifetime)): State<(S, C, B, SessionLifetime)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    S: SessionStore + 'static,
    C: CredentialCodec + 'static,
    B: CredentialBlacklist + 'static,
{
    let old_credential = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .ok_or_else(|| {
            ApiError::AuthenticationError("No refresh token provided".to_string())
        })?;

    let use_case = RotateSessionUseCase::new(sessions, codec, blacklist, lifetime.as_duration()?);
    let rotated = use_case.execute(&old_credential).await?;

    let jar = jar.add(refresh_cookie(
        rotated.refresh_credential,
        lifetime.refresh_ttl_in_seconds,
    ));

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({ "access": rotated.access_credential })),
    ))
}
