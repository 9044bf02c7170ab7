use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostFieldError;
use crate::domain::post::errors::PostIdError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Post unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title value type, required non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// # Errors
    /// * `EmptyTitle` - Title is empty or whitespace only
    pub fn new(title: String) -> Result<Self, PostFieldError> {
        if title.trim().is_empty() {
            return Err(PostFieldError::EmptyTitle);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post content value type, required non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// # Errors
    /// * `EmptyContent` - Content is empty or whitespace only
    pub fn new(content: String) -> Result<Self, PostFieldError> {
        if content.trim().is_empty() {
            return Err(PostFieldError::EmptyContent);
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Post aggregate entity.
///
/// The author is set at creation and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Read view of a post with the author's username resolved.
///
/// This is all a reader ever sees of the author; the user document itself
/// stays private.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author_username: Username,
}

/// Command to create a new post with validated fields
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub content: PostContent,
}

impl CreatePostCommand {
    pub fn new(title: PostTitle, content: PostContent) -> Self {
        Self { title, content }
    }
}

/// Command to update a post; absent fields keep their stored value.
#[derive(Debug)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
}
