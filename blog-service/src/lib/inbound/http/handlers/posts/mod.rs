use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostWithAuthor;

pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod update_post;

/// Post as returned from mutating operations; the author appears as an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.as_str().to_string(),
            content: post.content.as_str().to_string(),
            author: post.author_id.to_string(),
            created_at: post.created_at,
        }
    }
}

/// Post as returned from reads, with the author's username resolved.
///
/// The id and username are all that ever surfaces of the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithAuthorData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: AuthorData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub id: String,
    pub username: String,
}

impl From<&PostWithAuthor> for PostWithAuthorData {
    fn from(entry: &PostWithAuthor) -> Self {
        Self {
            id: entry.post.id.to_string(),
            title: entry.post.title.as_str().to_string(),
            content: entry.post.content.as_str().to_string(),
            author: AuthorData {
                id: entry.post.author_id.to_string(),
                username: entry.author_username.as_str().to_string(),
            },
            created_at: entry.post.created_at,
        }
    }
}
