use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use murmur_core::{AccountStore, Username};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CheckUsernameQuery {
    pub username: Option<String>,
}

/// Availability probe used by the registration form. A missing or malformed
/// username simply reads as unavailable.
#[tracing::instrument(name = "Check username", skip_all)]
pub async fn check_username<A>(
    State(accounts): State<A>,
    Query(query): Query<CheckUsernameQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + 'static,
{
    let Some(username) = query
        .username
        .and_then(|candidate| Username::try_from(candidate).ok())
    else {
        return Ok(Json(serde_json::json!({ "available": false })));
    };

    let taken = accounts
        .username_taken(&username)
        .await
        .map_err(|e| ApiError::DependencyError(e.to_string()))?;

    Ok(Json(serde_json::json!({ "available": !taken })))
}
