use http::header::AUTHORIZATION;
use http::HeaderMap;
use subtle::ConstantTimeEq;

use super::errors::HeaderError;

const BEARER_SCHEME: &str = "bearer";
const API_KEY_SCHEME: &str = "ApiKey";

fn authorization_value(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::MissingHeader)?
        .to_str()
        .map_err(|_| HeaderError::MalformedHeader)?;

    if value.is_empty() {
        return Err(HeaderError::MissingHeader);
    }

    Ok(value)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively and fields are split on runs of
/// whitespace, so `bearer   abc` yields `abc`.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header
/// * `MalformedHeader` - Scheme is not Bearer, or nothing separates a token from it
/// * `EmptyToken` - Only whitespace follows the scheme
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = authorization_value(headers)?;

    let (scheme, rest) = value
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or(HeaderError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(HeaderError::MalformedHeader);
    }

    rest.split_whitespace().next().ok_or(HeaderError::EmptyToken)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// The scheme literal is case-sensitive. Only the first space separates scheme
/// from key, so keys containing inner spaces are preserved; surrounding
/// whitespace is trimmed.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header
/// * `MalformedHeader` - Scheme is not exactly `ApiKey`
/// * `EmptyKey` - Nothing follows the scheme
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = authorization_value(headers)?;

    let (scheme, key) = value
        .split_once(' ')
        .ok_or(HeaderError::MalformedHeader)?;

    if scheme != API_KEY_SCHEME {
        return Err(HeaderError::MalformedHeader);
    }

    let key = key.trim();
    if key.is_empty() {
        return Err(HeaderError::EmptyKey);
    }

    Ok(key)
}

/// Compare a presented API key with the configured one in constant time.
pub fn verify_api_key(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_scheme_is_case_insensitive() {
        let headers = headers_with("bEaReR   abc.def.ghi  ");
        assert_eq!(extract_bearer(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_wrong_scheme() {
        let headers = headers_with("Basic xyz");
        assert_eq!(extract_bearer(&headers), Err(HeaderError::MalformedHeader));
    }

    #[test]
    fn test_extract_bearer_without_token() {
        let headers = headers_with("Bearer");
        assert_eq!(extract_bearer(&headers), Err(HeaderError::MalformedHeader));

        let headers = headers_with("Bearer    ");
        assert_eq!(extract_bearer(&headers), Err(HeaderError::EmptyToken));

        let headers = headers_with("Basic    ");
        assert_eq!(extract_bearer(&headers), Err(HeaderError::MalformedHeader));
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(HeaderError::MissingHeader)
        );
        assert_eq!(
            extract_bearer(&headers_with("")),
            Err(HeaderError::MissingHeader)
        );
    }

    #[test]
    fn test_extract_api_key() {
        let headers = headers_with("ApiKey secret123");
        assert_eq!(extract_api_key(&headers), Ok("secret123"));
    }

    #[test]
    fn test_extract_api_key_preserves_inner_spaces() {
        let headers = headers_with("ApiKey  key with spaces ");
        assert_eq!(extract_api_key(&headers), Ok("key with spaces"));
    }

    #[test]
    fn test_extract_api_key_scheme_is_case_sensitive() {
        let headers = headers_with("apikey secret123");
        assert_eq!(extract_api_key(&headers), Err(HeaderError::MalformedHeader));
    }

    #[test]
    fn test_extract_api_key_rejects_bearer() {
        let headers = headers_with("Bearer secret123");
        assert_eq!(extract_api_key(&headers), Err(HeaderError::MalformedHeader));
    }

    #[test]
    fn test_extract_api_key_empty_key() {
        let headers = headers_with("ApiKey   ");
        assert_eq!(extract_api_key(&headers), Err(HeaderError::EmptyKey));

        let headers = headers_with("ApiKey");
        assert_eq!(extract_api_key(&headers), Err(HeaderError::MalformedHeader));
    }

    #[test]
    fn test_extract_api_key_missing_header() {
        assert_eq!(
            extract_api_key(&HeaderMap::new()),
            Err(HeaderError::MissingHeader)
        );
    }

    #[test]
    fn test_verify_api_key() {
        assert!(verify_api_key("secret123", "secret123"));
        assert!(!verify_api_key("secret124", "secret123"));
        assert!(!verify_api_key("secret", "secret123"));
    }
}
