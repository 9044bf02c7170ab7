use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithAuthor;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        author: UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// List all posts with author usernames resolved. Public.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, PostError>;

    /// Retrieve a single post with its author username. Public.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<PostWithAuthor, PostError>;

    /// Merge the provided fields into a post owned by `author`.
    ///
    /// The ownership check is evaluated fresh on every call.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Caller is not the post's author
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        author: UserId,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post owned by `author`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Caller is not the post's author
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, author: UserId, id: PostId) -> Result<(), PostError>;
}

/// Persistence operations for the post aggregate.
///
/// Mutations are keyed by id AND author so the store's per-row atomicity
/// covers the ownership check; a concurrent delete shows up as zero rows
/// affected rather than a lost update.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve a post by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve a post with its author's username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, PostError>;

    /// Retrieve all posts with author usernames, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, PostError>;

    /// Write updated fields, conditional on the post still belonging to its
    /// author. Returns false when no matching row was written.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_owned(&self, post: &Post) -> Result<bool, PostError>;

    /// Delete a post, conditional on ownership. Returns false when no
    /// matching row was removed.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_owned(&self, id: PostId, author: UserId) -> Result<bool, PostError>;
}
