use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Lifetime of a refresh token from its creation.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Persisted refresh token record.
///
/// Rows are never deleted by the session protocol; revoked and expired
/// records stay for audit and simply fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a refresh token at a given instant.
///
/// `Revoked` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Revoked,
    Expired,
}

impl RefreshToken {
    /// Create a fresh, unrevoked record expiring `ttl` after `now`.
    pub fn new(token: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    /// Evaluate the record at `now`. Revocation takes precedence over expiry.
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now >= self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }
}

/// Credentials presented at login.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(now: DateTime<Utc>) -> RefreshToken {
        RefreshToken::new(
            "a".repeat(64),
            UserId::new(),
            now,
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
        )
    }

    #[test]
    fn test_new_record_is_active() {
        let now = Utc::now();
        let token = record(now);

        assert_eq!(token.revoked_at, None);
        assert_eq!(token.expires_at - token.created_at, Duration::days(60));
        assert_eq!(token.state_at(now), RefreshTokenState::Active);
    }

    #[test]
    fn test_record_expires_at_boundary() {
        let now = Utc::now();
        let token = record(now);

        assert_eq!(
            token.state_at(token.expires_at - Duration::seconds(1)),
            RefreshTokenState::Active
        );
        assert_eq!(
            token.state_at(token.expires_at),
            RefreshTokenState::Expired
        );
    }

    #[test]
    fn test_revocation_takes_precedence_over_expiry() {
        let now = Utc::now();
        let mut token = record(now);
        token.revoked_at = Some(now);

        assert_eq!(token.state_at(now), RefreshTokenState::Revoked);
        assert_eq!(
            token.state_at(now + Duration::days(90)),
            RefreshTokenState::Revoked
        );
    }
}
