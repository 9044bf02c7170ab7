use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::PostWithAuthorData;
use crate::domain::post::models::PostId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Public read; no authentication required.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<PostWithAuthorData>, ApiError> {
    let id = PostId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .posts
        .get_post(id)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
