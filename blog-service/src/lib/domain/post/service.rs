use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithAuthor;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
///
/// Enforces the ownership invariant: only the author may mutate a post, and
/// the check happens against freshly fetched state on every mutating call.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author: UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = Post {
            id: PostId::new(),
            title: command.title,
            content: command.content,
            author_id: author,
            created_at: Utc::now(),
        };

        self.repository.create(post).await
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, PostError> {
        self.repository.list_with_authors().await
    }

    async fn get_post(&self, id: PostId) -> Result<PostWithAuthor, PostError> {
        self.repository
            .find_with_author(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }

    async fn update_post(
        &self,
        author: UserId,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        if post.author_id != author {
            return Err(PostError::NotOwner);
        }

        if let Some(title) = command.title {
            post.title = title;
        }
        if let Some(content) = command.content {
            post.content = content;
        }

        // The write is conditional on ownership; zero rows means the post
        // vanished between the fetch and the write.
        let written = self.repository.update_owned(&post).await?;
        if !written {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(post)
    }

    async fn delete_post(&self, author: UserId, id: PostId) -> Result<(), PostError> {
        let post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))?;

        if post.author_id != author {
            return Err(PostError::NotOwner);
        }

        let removed = self.repository.delete_owned(id, author).await?;
        if !removed {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::post::models::PostContent;
    use crate::domain::post::models::PostTitle;
    use crate::domain::user::models::Username;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: Post) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, PostError>;
            async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, PostError>;
            async fn update_owned(&self, post: &Post) -> Result<bool, PostError>;
            async fn delete_owned(&self, id: PostId, author: UserId) -> Result<bool, PostError>;
        }
    }

    fn sample_post(author: UserId) -> Post {
        Post {
            id: PostId::new(),
            title: PostTitle::new("First post".to_string()).unwrap(),
            content: PostContent::new("Hello".to_string()).unwrap(),
            author_id: author,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_post_sets_author() {
        let mut repository = MockTestPostRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |post| {
                post.author_id == author && post.title.as_str() == "First post"
            })
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository));

        let command = CreatePostCommand::new(
            PostTitle::new("First post".to_string()).unwrap(),
            PostContent::new("Hello".to_string()).unwrap(),
        );

        let result = service.create_post(author, command).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().author_id, author);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_with_author()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let result = service.get_post(PostId::new()).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_post_merges_provided_fields() {
        let author = UserId::new();
        let post = sample_post(author);
        let post_id = post.id;

        let mut repository = MockTestPostRepository::new();
        let stored = post.clone();
        repository
            .expect_find_by_id()
            .with(eq(post_id))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_update_owned()
            .withf(move |updated| {
                updated.title.as_str() == "New title" && updated.content.as_str() == "Hello"
            })
            .times(1)
            .returning(|_| Ok(true));

        let service = PostService::new(Arc::new(repository));

        let command = UpdatePostCommand {
            title: Some(PostTitle::new("New title".to_string()).unwrap()),
            content: None,
        };

        let result = service.update_post(author, post_id, command).await;
        assert!(result.is_ok());

        let updated = result.unwrap();
        assert_eq!(updated.title.as_str(), "New title");
        assert_eq!(updated.content.as_str(), "Hello");
    }

    #[tokio::test]
    async fn test_update_post_by_non_owner_forbidden() {
        let author = UserId::new();
        let post = sample_post(author);
        let post_id = post.id;

        let mut repository = MockTestPostRepository::new();
        let stored = post.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_update_owned().times(0);

        let service = PostService::new(Arc::new(repository));

        let intruder = UserId::new();
        let command = UpdatePostCommand {
            title: Some(PostTitle::new("Hijacked".to_string()).unwrap()),
            content: None,
        };

        let result = service.update_post(intruder, post_id, command).await;
        assert!(matches!(result.unwrap_err(), PostError::NotOwner));
    }

    #[tokio::test]
    async fn test_update_post_missing() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let command = UpdatePostCommand {
            title: None,
            content: Some(PostContent::new("body".to_string()).unwrap()),
        };

        let result = service.update_post(UserId::new(), PostId::new(), command).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_post_concurrently_removed() {
        let author = UserId::new();
        let post = sample_post(author);
        let post_id = post.id;

        let mut repository = MockTestPostRepository::new();
        let stored = post.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        // Conditional write finds no row: post deleted between fetch and write.
        repository
            .expect_update_owned()
            .times(1)
            .returning(|_| Ok(false));

        let service = PostService::new(Arc::new(repository));

        let command = UpdatePostCommand {
            title: Some(PostTitle::new("New title".to_string()).unwrap()),
            content: None,
        };

        let result = service.update_post(author, post_id, command).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_post_success() {
        let author = UserId::new();
        let post = sample_post(author);
        let post_id = post.id;

        let mut repository = MockTestPostRepository::new();
        let stored = post.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete_owned()
            .with(eq(post_id), eq(author))
            .times(1)
            .returning(|_, _| Ok(true));

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(author, post_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_post_by_non_owner_forbidden() {
        let author = UserId::new();
        let post = sample_post(author);
        let post_id = post.id;

        let mut repository = MockTestPostRepository::new();
        let stored = post.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_delete_owned().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(UserId::new(), post_id).await;
        assert!(matches!(result.unwrap_err(), PostError::NotOwner));
    }

    #[tokio::test]
    async fn test_list_posts_resolves_author_username() {
        let author = UserId::new();
        let post = sample_post(author);

        let mut repository = MockTestPostRepository::new();
        let listed = PostWithAuthor {
            post: post.clone(),
            author_username: Username::new("alice".to_string()).unwrap(),
        };
        repository
            .expect_list_with_authors()
            .times(1)
            .returning(move || Ok(vec![listed.clone()]));

        let service = PostService::new(Arc::new(repository));

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_username.as_str(), "alice");
    }
}
