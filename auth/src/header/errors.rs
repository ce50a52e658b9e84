use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Authorization header is missing")]
    MissingHeader,

    #[error("Authorization header is malformed")]
    MalformedHeader,

    #[error("Bearer token is empty")]
    EmptyToken,

    #[error("API key is empty")]
    EmptyKey,
}
