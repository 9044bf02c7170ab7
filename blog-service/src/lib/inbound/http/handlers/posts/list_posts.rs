use axum::extract::State;
use axum::http::StatusCode;

use super::PostWithAuthorData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Public listing; no authentication required.
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostWithAuthorData>>, ApiError> {
    state
        .posts
        .list_posts()
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(PostWithAuthorData::from).collect(),
            )
        })
}
