use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use thiserror::Error;

/// Number of random bytes behind a refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenGenerationError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generate an opaque refresh token value.
///
/// # Returns
/// 64 lowercase hexadecimal characters encoding 32 bytes from the OS CSPRNG
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenGenerationError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenGenerationError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
