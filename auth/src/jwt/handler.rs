use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::errors::AccessTokenError;

/// Issuer claim stamped on every access token.
pub const ISSUER: &str = "chirpy";

const PREVIEW_LENGTH: usize = 12;

/// Bounded prefix of a token, the only form in which a token may be logged.
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > PREVIEW_LENGTH {
        let prefix: String = token.chars().take(PREVIEW_LENGTH).collect();
        format!("{prefix}...")
    } else {
        token.to_string()
    }
}

/// Access token codec for issuing and verifying signed bearer tokens.
///
/// Tokens are HS256 JWTs carrying `iss`, `sub`, `iat` and `exp`. HS256 is the
/// only accepted algorithm; anything else is rejected before the signature is
/// looked at.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl AccessTokenCodec {
    /// Create a new codec bound to the server signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, AccessTokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token for `subject` as if the current instant were `now`.
    pub fn issue_at(
        &self,
        subject: Uuid,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AccessTokenError> {
        let claims = AccessClaims::new(ISSUER, subject, now, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AccessTokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a decodable JWT
    /// * `AlgorithmMismatch` - Header declares an algorithm other than HS256
    /// * `SignatureInvalid` - Signature does not verify under the secret
    /// * `Expired` - Current time is at or past `exp`
    /// * `MalformedSubject` - `sub` is not a UUID
    pub fn verify(&self, token: &str) -> Result<Uuid, AccessTokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current instant were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, AccessTokenError> {
        let result = self.decode_claims(token).and_then(|claims| {
            if claims.is_expired(now.timestamp()) {
                return Err(AccessTokenError::Expired);
            }
            claims
                .subject()
                .map_err(|e| AccessTokenError::MalformedSubject(e.to_string()))
        });

        if let Err(e) = &result {
            tracing::debug!(
                error = %e,
                token_preview = %token_preview(token),
                "Access token rejected"
            );
        }

        result
    }

    fn decode_claims(&self, token: &str) -> Result<AccessClaims, AccessTokenError> {
        let header = decode_header(token).map_err(|e| {
            match declared_algorithm(token) {
                Some(alg) if alg != "HS256" => AccessTokenError::AlgorithmMismatch {
                    expected: format!("{:?}", self.algorithm),
                    found: alg,
                },
                _ => AccessTokenError::Malformed(e.to_string()),
            }
        })?;

        if header.alg != self.algorithm {
            return Err(AccessTokenError::AlgorithmMismatch {
                expected: format!("{:?}", self.algorithm),
                found: format!("{:?}", header.alg),
            });
        }

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock with no leeway
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AccessTokenError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm => AccessTokenError::AlgorithmMismatch {
                    expected: format!("{:?}", self.algorithm),
                    found: format!("{:?}", header.alg),
                },
                _ => AccessTokenError::Malformed(e.to_string()),
            })
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// `alg` as written in the token header, for algorithms `jsonwebtoken` has no
/// variant for (`none` among them).
fn declared_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes)
        .ok()
        .map(|header| header.alg)
}
