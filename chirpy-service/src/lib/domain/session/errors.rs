use auth::AccessTokenError;
use auth::HeaderError;
use auth::PasswordError;
use auth::RefreshTokenGenerationError;
use thiserror::Error;

/// Error for refresh token persistence
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token violates a constraint: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Why a presented credential was rejected.
///
/// Kept for operator logs only; callers see a single unauthorized status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnauthorizedReason {
    #[error("refresh token not found")]
    RefreshTokenNotFound,

    #[error("refresh token revoked")]
    RefreshTokenRevoked,

    #[error("refresh token expired")]
    RefreshTokenExpired,

    #[error("access token rejected: {0}")]
    AccessToken(#[from] AccessTokenError),

    #[error("authorization header rejected: {0}")]
    Header(#[from] HeaderError),
}

/// Top-level error for session operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    // Caller-fault errors
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] UnauthorizedReason),

    // Server-side errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(AccessTokenError),

    #[error("Refresh token generation failed: {0}")]
    Entropy(#[from] RefreshTokenGenerationError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl SessionError {
    /// True when the failure is not attributable to the caller's input.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            SessionError::Password(_)
                | SessionError::TokenIssuance(_)
                | SessionError::Entropy(_)
                | SessionError::DatabaseError(_)
        )
    }
}

impl From<RefreshTokenError> for SessionError {
    fn from(err: RefreshTokenError) -> Self {
        match err {
            RefreshTokenError::NotFound => {
                SessionError::Unauthorized(UnauthorizedReason::RefreshTokenNotFound)
            }
            RefreshTokenError::ConstraintViolation(msg) | RefreshTokenError::DatabaseError(msg) => {
                SessionError::DatabaseError(msg)
            }
        }
    }
}

impl From<HeaderError> for SessionError {
    fn from(err: HeaderError) -> Self {
        SessionError::Unauthorized(UnauthorizedReason::Header(err))
    }
}
