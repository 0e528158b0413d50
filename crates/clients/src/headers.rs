//! Outbound header composition.

use reqwest::header::{HeaderMap, HeaderValue};

/// Header carrying a downstream API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the checkout idempotency key on order creation.
pub const IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";

/// Builds the header map for an outbound call: `extra` merged with a single
/// conditional API-key entry, present only when a key is configured.
///
/// Pure function: the input map is never mutated. A key that is not a valid
/// header value is skipped.
pub fn compose_headers(api_key: Option<&str>, extra: &HeaderMap) -> HeaderMap {
    let mut headers = extra.clone();
    if let Some(key) = api_key
        && let Ok(value) = HeaderValue::from_str(key)
    {
        headers.insert(API_KEY_HEADER, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_api_key_when_configured() {
        let headers = compose_headers(Some("secret"), &HeaderMap::new());
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret");
    }

    #[test]
    fn omits_api_key_when_absent() {
        let headers = compose_headers(None, &HeaderMap::new());
        assert!(headers.get(API_KEY_HEADER).is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn preserves_extra_headers() {
        let mut extra = HeaderMap::new();
        extra.insert("x-request-id", HeaderValue::from_static("abc-123"));

        let headers = compose_headers(Some("secret"), &extra);
        assert_eq!(headers.get("x-request-id").unwrap(), "abc-123");
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret");
    }

    #[test]
    fn does_not_mutate_input() {
        let mut extra = HeaderMap::new();
        extra.insert("x-request-id", HeaderValue::from_static("abc-123"));

        let _ = compose_headers(Some("secret"), &extra);
        assert_eq!(extra.len(), 1);
        assert!(extra.get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn skips_invalid_api_key() {
        let headers = compose_headers(Some("bad\nkey"), &HeaderMap::new());
        assert!(headers.get(API_KEY_HEADER).is_none());
    }
}
