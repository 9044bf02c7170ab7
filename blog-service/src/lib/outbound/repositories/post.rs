use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostContent;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::PostWithAuthor;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            title: PostTitle::new(row.title)?,
            content: PostContent::new(row.content)?,
            author_id: UserId(row.author_id),
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct PostWithAuthorRow {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    author_username: String,
}

impl TryFrom<PostWithAuthorRow> for PostWithAuthor {
    type Error = PostError;

    fn try_from(row: PostWithAuthorRow) -> Result<Self, Self::Error> {
        let author_username = Username::new(row.author_username)
            .map_err(|e| PostError::Unknown(format!("Stored username invalid: {}", e)))?;

        Ok(PostWithAuthor {
            post: Post {
                id: PostId(row.id),
                title: PostTitle::new(row.title)?,
                content: PostContent::new(row.content)?,
                author_id: UserId(row.author_id),
                created_at: row.created_at,
            },
            author_username,
        })
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.author_id.0)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author_id, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.map(Post::try_from).transpose()
    }

    async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, PostError> {
        let row = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.created_at,
                   u.username AS author_username
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.map(PostWithAuthor::try_from).transpose()
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, PostError> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.created_at,
                   u.username AS author_username
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PostWithAuthor::try_from).collect()
    }

    async fn update_owned(&self, post: &Post) -> Result<bool, PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $3, content = $4
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(post.id.0)
        .bind(post.author_id.0)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: PostId, author: UserId) -> Result<bool, PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(id.0)
        .bind(author.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
