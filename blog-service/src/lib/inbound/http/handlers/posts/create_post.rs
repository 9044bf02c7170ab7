use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::PostData;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AppJson;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(body): AppJson<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let title = PostTitle::new(body.title).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let content =
        PostContent::new(body.content).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .posts
        .create_post(auth.user_id, CreatePostCommand::new(title, content))
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

/// HTTP request body for post creation (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    content: String,
}
