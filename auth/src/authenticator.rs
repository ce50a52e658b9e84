use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::AccessTokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of every access token issued by the [`Authenticator`].
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication coordinator combining password verification and access token issuance.
///
/// Holds the process-wide signing secret for its whole lifetime; share it
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: AccessTokenCodec,
    access_token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Access token error: {0}")]
    AccessTokenError(#[from] AccessTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_password_hasher(jwt_secret, PasswordHasher::new())
    }

    /// Create an authenticator with a custom-cost password hasher.
    pub fn with_password_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            token_codec: AccessTokenCodec::new(jwt_secret),
            access_token_ttl: Duration::hours(ACCESS_TOKEN_TTL_HOURS),
        }
    }

    /// Lifetime applied to issued access tokens.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed or verification failed
    /// * `AccessTokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_access_token(subject)?)
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the caller has already proven identity
    /// with a refresh token.
    pub fn issue_access_token(&self, subject: Uuid) -> Result<String, AccessTokenError> {
        self.token_codec.issue(subject, self.access_token_ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, AccessTokenError> {
        self.token_codec.verify(token)
    }
}
