use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::PostData;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AppJson;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let id = PostId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let title = body
        .title
        .map(PostTitle::new)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let content = body
        .content
        .map(PostContent::new)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let command = UpdatePostCommand { title, content };

    state
        .posts
        .update_post(auth.user_id, id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}

/// HTTP request body for post updates; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePostRequest {
    title: Option<String>,
    content: Option<String>,
}
