use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::RefreshTokenError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::Session;
use crate::domain::user::models::UserId;

/// Port for the session protocol.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a new session.
    ///
    /// Every call creates an additional refresh token; concurrent sessions for
    /// one user are allowed.
    ///
    /// # Returns
    /// Authenticated user with a one-hour access token and a 60-day refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * Server-side variants - Hashing, signing, entropy or storage failure
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `Unauthorized` - Token unknown, revoked or expired
    /// * Server-side variants - Signing or storage failure
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token. Unknown tokens are accepted silently.
    ///
    /// # Errors
    /// * `DatabaseError` - The revoke write failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Verify an access token and return the identity it was issued for.
    ///
    /// # Errors
    /// * `Unauthorized` - Token rejected by the codec
    fn authorize(&self, access_token: &str) -> Result<UserId, SessionError>;

    /// Delete every refresh token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn purge(&self) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens, keyed by token value.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new refresh token record.
    ///
    /// # Errors
    /// * `ConstraintViolation` - Owner does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    /// Retrieve the record matching `token` exactly.
    ///
    /// # Errors
    /// * `NotFound` - No record with this value
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<RefreshToken, RefreshTokenError>;

    /// Set `revoked_at` on the matching record if it is not revoked yet.
    ///
    /// Revoking an already-revoked or unknown token is not an error and does
    /// not move the existing timestamp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>)
        -> Result<(), RefreshTokenError>;

    /// Remove all refresh token records.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all(&self) -> Result<(), RefreshTokenError>;
}
