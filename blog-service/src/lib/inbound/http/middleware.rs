use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Identity resolved from a verified session token.
///
/// Acts as the guard for routes that require identity: handlers that take
/// this extractor never run for unauthenticated requests. Purely a gate; the
/// token payload alone carries identity, so no database lookup happens here.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar.get(SESSION_COOKIE).ok_or_else(|| {
            ApiError::Unauthorized("Access denied. No token provided.".to_string())
        })?;

        // Malformed, tampered, and expired tokens are deliberately
        // indistinguishable here.
        let user_id_str = state.sessions.verify(token.value()).map_err(|e| {
            tracing::warn!("Session token rejected: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let user_id = UserId::from_string(&user_id_str).map_err(|e| {
            tracing::warn!("Session token carried a bad subject: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Build the session cookie set on successful registration or login.
///
/// HttpOnly and path-wide; max-age matches the token's own lifetime. Not
/// marked Secure so local HTTP deployments work.
pub fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(false)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}
