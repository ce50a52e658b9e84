//! Authentication utilities library
//!
//! Provides the session primitives used by the chirpy service:
//! - Password hashing (Argon2id)
//! - HS256 access token issuance and verification
//! - Opaque refresh token generation
//! - `Authorization` header parsing (Bearer and ApiKey schemes)
//! - Authentication coordination
//!
//! Nothing here touches storage; refresh token persistence and the session
//! protocol live in the service crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Header Extraction
//! ```
//! use auth::extract_bearer;
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
//! assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::ACCESS_TOKEN_TTL_HOURS;
pub use header::extract_api_key;
pub use header::extract_bearer;
pub use header::verify_api_key;
pub use header::HeaderError;
pub use jwt::token_preview;
pub use jwt::AccessClaims;
pub use jwt::AccessTokenCodec;
pub use jwt::AccessTokenError;
pub use password::PasswordError;
pub use password::HashParams;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenGenerationError;
