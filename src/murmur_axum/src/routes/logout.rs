use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use murmur_application::LogoutUseCase;
use murmur_core::{CredentialBlacklist, CredentialCodec, SessionStore};

use crate::{
    cookies::{REFRESH_COOKIE_NAME, removal_cookie},
    error::ApiError,
};

/// Kill the session behind the refresh cookie and clear it.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S, C, B>(
    State((sessions, codec, blacklist)): State<(S, C, B)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    S: SessionStore + 'static,
    C: CredentialCodec + 'static,
    B: CredentialBlacklist + 'static,
{
    let credential = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(ApiError::MissingRefreshCredential)?;

    let use_case = LogoutUseCase::new(sessions, codec, blacklist);
    use_case.execute(&credential).await?;

    let jar = jar.add(removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({ "message": "Successfully logged out" })),
    ))
}
