use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Registered claims carried by an access token.
///
/// Every field is required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier, canonical UUID string)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject, valid for `ttl` from `now`.
    ///
    /// # Arguments
    /// * `issuer` - Issuing service name
    /// * `subject` - User identifier
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    pub fn new(issuer: &str, subject: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Parse the subject claim as a user identifier.
    pub fn subject(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
