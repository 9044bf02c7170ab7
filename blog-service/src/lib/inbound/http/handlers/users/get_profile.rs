use axum::extract::State;
use axum::http::StatusCode;

use super::UserProfileData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile for the identity behind the verified token. 404 if the account no
/// longer resolves to a stored user.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    state
        .users
        .get_user(&auth.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
