use thiserror::Error;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid post id: {0}")]
    InvalidFormat(String),
}

/// Error for post field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostFieldError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Content is required")]
    EmptyContent,
}

/// Top-level error for post operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post id: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid post field: {0}")]
    InvalidField(#[from] PostFieldError),

    #[error("Post not found")]
    NotFound(String),

    #[error("User not authorized to modify this post")]
    NotOwner,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
