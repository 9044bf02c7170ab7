use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Error type for session token operations.
///
/// Verification failures collapse into the single `InvalidToken` variant so
/// callers cannot tell a tampered token from an expired one.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Failed to issue token: {0}")]
    IssueFailed(String),

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Claims carried by a session token.
///
/// Deliberately minimal: the subject's user id and timestamps, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Tokens are HS256 JWTs with a fixed time-to-live from issuance. There is no
/// server-side token store: a token stays valid until its expiry.
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl SessionService {
    /// Create a session service with a signing secret and token lifetime.
    ///
    /// The secret should be at least 32 bytes and come from configuration,
    /// never from source.
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token for a user id, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue(&self, user_id: &str) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SessionError::IssueFailed(e.to_string()))
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, tampered, or expired token
    pub fn verify(&self, token: &str) -> Result<String, SessionError> {
        let validation = Validation::new(self.algorithm);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| SessionError::InvalidToken)?;

        Ok(token_data.claims.sub)
    }

    /// Token lifetime in whole seconds, for cookie max-age.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let sessions = SessionService::new(SECRET, 7);

        let token = sessions.issue("user123").expect("Failed to issue token");
        assert!(!token.is_empty());

        let user_id = sessions.verify(&token).expect("Failed to verify token");
        assert_eq!(user_id, "user123");
    }

    #[test]
    fn test_verify_malformed_token() {
        let sessions = SessionService::new(SECRET, 7);

        let result = sessions.verify("not.a.token");
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = SessionService::new(SECRET, 7);
        let other = SessionService::new(b"another_secret_key_32_bytes_long!!", 7);

        let token = issuer.issue("user123").expect("Failed to issue token");

        let result = other.verify(&token);
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_verify_expired_token() {
        // A negative TTL puts the expiry in the past, beyond the default
        // validation leeway.
        let sessions = SessionService::new(SECRET, -1);

        let token = sessions.issue("user123").expect("Failed to issue token");

        let result = sessions.verify(&token);
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }

    #[test]
    fn test_expiry_error_indistinguishable_from_tampering() {
        let sessions = SessionService::new(SECRET, -1);
        let expired = sessions.issue("user123").expect("Failed to issue token");

        let expired_err = sessions.verify(&expired).unwrap_err();
        let garbage_err = sessions.verify("garbage").unwrap_err();

        assert_eq!(expired_err.to_string(), garbage_err.to_string());
    }

    #[test]
    fn test_ttl_seconds() {
        let sessions = SessionService::new(SECRET, 7);
        assert_eq!(sessions.ttl_seconds(), 7 * 24 * 60 * 60);
    }
}
