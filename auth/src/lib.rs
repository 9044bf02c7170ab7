//! Authentication infrastructure for the blog service
//!
//! Provides the two credential primitives the service builds on:
//! - Password hashing (Argon2id)
//! - Signed, time-limited session tokens (HS256 JWT)
//!
//! Tokens are self-contained: verification is purely cryptographic and
//! time-based, so no database lookup is needed and revocation before natural
//! expiry is not possible.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::SessionService;
//!
//! let sessions = SessionService::new(b"secret_key_at_least_32_bytes_long!", 7);
//! let token = sessions.issue("user123").unwrap();
//! let user_id = sessions.verify(&token).unwrap();
//! assert_eq!(user_id, "user123");
//! ```

pub mod password;
pub mod session;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionError;
pub use session::SessionService;
