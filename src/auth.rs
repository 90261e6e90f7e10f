//! Client key validation
//!
//! Only the shape of the presented key is checked: after an optional
//! `Bearer ` scheme it must start with `sk-`. There is no key registry.

use crate::{Error, Result};
use axum::http::{header, HeaderMap};

const BEARER_PREFIX: &str = "bearer ";
const KEY_PREFIX: &str = "sk-";

/// Validates a raw `Authorization` header value and returns the bare key.
pub fn validate_api_key(authorization: Option<&str>) -> Result<&str> {
    let auth = authorization.unwrap_or_default().trim();

    let key = match auth.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            &auth[BEARER_PREFIX.len()..]
        }
        _ => auth,
    };

    if key.starts_with(KEY_PREFIX) {
        Ok(key)
    } else {
        Err(Error::InvalidKey)
    }
}

/// Header-map flavour of [`validate_api_key`]. A header that is not valid
/// visible ASCII counts as absent.
pub fn authorize(headers: &HeaderMap) -> Result<()> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    validate_api_key(authorization).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_accepts_bearer_key() {
        assert_eq!(validate_api_key(Some("Bearer sk-abc")).unwrap(), "sk-abc");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        assert_eq!(validate_api_key(Some("bearer sk-abc")).unwrap(), "sk-abc");
        assert_eq!(validate_api_key(Some("BEARER sk-abc")).unwrap(), "sk-abc");
    }

    #[test]
    fn test_accepts_bare_key_and_trims_whitespace() {
        assert_eq!(validate_api_key(Some("sk-abc")).unwrap(), "sk-abc");
        assert_eq!(validate_api_key(Some("  Bearer sk-abc \t")).unwrap(), "sk-abc");
    }

    #[test]
    fn test_any_token_after_prefix_is_accepted() {
        assert_eq!(validate_api_key(Some("sk-")).unwrap(), "sk-");
    }

    #[test]
    fn test_rejects_missing_header() {
        assert!(matches!(validate_api_key(None), Err(Error::InvalidKey)));
        assert!(matches!(validate_api_key(Some("")), Err(Error::InvalidKey)));
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        for raw in [
            "Bearer pk-abc",
            "Bearer SK-abc",
            "Basic sk-abc",
            "Bearer  sk-abc",
            "Bearer",
            "abc",
        ] {
            assert!(
                matches!(validate_api_key(Some(raw)), Err(Error::InvalidKey)),
                "expected rejection for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_authorize_reads_header_map() {
        let mut headers = HeaderMap::new();
        assert!(authorize(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer sk-x"));
        assert!(authorize(&headers).is_ok());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer sk-\xff").unwrap(),
        );
        assert!(authorize(&headers).is_err());
    }
}
