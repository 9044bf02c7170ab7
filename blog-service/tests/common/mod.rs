use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::SessionService;
use blog_service::domain::post::errors::PostError;
use blog_service::domain::post::models::Post;
use blog_service::domain::post::models::PostId;
use blog_service::domain::post::models::PostWithAuthor;
use blog_service::domain::post::ports::PostRepository;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::errors::UserError;
use blog_service::domain::user::models::User;
use blog_service::domain::user::models::UserId;
use blog_service::domain::user::models::Username;
use blog_service::domain::user::ports::UserRepository;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-signing-at-least-32-bytes";

/// Test application backed by in-memory repositories, spawned on a random
/// port and driven over real HTTP so the cookie flow and error boundary are
/// exercised end to end.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub sessions: SessionService,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let post_repo = Arc::new(InMemoryPostRepository::new(user_repo.clone()));

        let users = Arc::new(UserService::new(user_repo));
        let posts = Arc::new(PostService::new(post_repo));
        let sessions = Arc::new(SessionService::new(TEST_SECRET, 7));

        let router = create_router(users, posts, sessions);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: Self::new_client(),
            sessions: SessionService::new(TEST_SECRET, 7),
        }
    }

    /// Fresh client with its own cookie store; use one per simulated user.
    pub fn new_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register a user with the default client and return their id.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/users/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("Missing user id").to_string()
    }
}

pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    async fn username_of(&self, id: UserId) -> Option<Username> {
        self.users
            .lock()
            .await
            .get(&id.0)
            .map(|user| user.username.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().await;

        let taken = users.values().any(|existing| {
            existing.username == user.username || existing.email == user.email
        });
        if taken {
            return Err(UserError::AlreadyExists);
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().await.get(&id.0).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }
}

pub struct InMemoryPostRepository {
    posts: Mutex<HashMap<Uuid, Post>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            posts: Mutex::new(HashMap::new()),
            users,
        }
    }

    async fn with_author(&self, post: Post) -> Result<PostWithAuthor, PostError> {
        let author_username = self
            .users
            .username_of(post.author_id)
            .await
            .ok_or_else(|| PostError::Unknown("Author missing".to_string()))?;
        Ok(PostWithAuthor {
            post,
            author_username,
        })
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.lock().await.insert(post.id.0, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.lock().await.get(&id.0).cloned())
    }

    async fn find_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, PostError> {
        let post = self.posts.lock().await.get(&id.0).cloned();
        match post {
            Some(post) => Ok(Some(self.with_author(post).await?)),
            None => Ok(None),
        }
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, PostError> {
        let mut posts: Vec<Post> = self.posts.lock().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut listed = Vec::with_capacity(posts.len());
        for post in posts {
            listed.push(self.with_author(post).await?);
        }
        Ok(listed)
    }

    async fn update_owned(&self, post: &Post) -> Result<bool, PostError> {
        let mut posts = self.posts.lock().await;
        match posts.get_mut(&post.id.0) {
            Some(stored) if stored.author_id == post.author_id => {
                *stored = post.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, id: PostId, author: UserId) -> Result<bool, PostError> {
        let mut posts = self.posts.lock().await;
        match posts.get(&id.0) {
            Some(stored) if stored.author_id == author => {
                posts.remove(&id.0);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
