use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::UserProfileData;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AppJson;
use crate::inbound::http::middleware::session_cookie;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<UserProfileData>), ApiError> {
    if body.username.is_empty() {
        return Err(ApiError::BadRequest("Username is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    // A username that cannot exist gets the same response as a wrong
    // password; nothing about stored accounts leaks.
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let user = state.users.login(&username, &body.password).await?;

    let token = state
        .sessions
        .issue(&user.id.to_string())
        .map_err(|e| ApiError::InternalServerError(format!("Token issuance failed: {}", e)))?;

    let jar = jar.add(session_cookie(token, state.sessions.ttl_seconds()));

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&user).into())))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}
