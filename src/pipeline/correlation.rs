//! Correlation id resolution.

use axum::http::HeaderMap;
use uuid::Uuid;

/// Inbound header carrying the caller's correlation id.
pub const CORRELATION_ID: &str = "correlation-id";

/// Read the correlation id header, generating a UUID v4 when it is
/// absent, blank, or not valid text.
pub fn resolve_correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_propagates_supplied_id() {
        let mut headers = HeaderMap::new();
        headers.insert("Correlation-Id", HeaderValue::from_static("abc-123"));
        assert_eq!(resolve_correlation_id(&headers), "abc-123");
    }

    #[test]
    fn test_generates_when_missing() {
        let id = resolve_correlation_id(&HeaderMap::new());
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generates_when_blank() {
        let mut headers = HeaderMap::new();
        headers.insert(CORRELATION_ID, HeaderValue::from_static("   "));
        let id = resolve_correlation_id(&headers);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let headers = HeaderMap::new();
        assert_ne!(resolve_correlation_id(&headers), resolve_correlation_id(&headers));
    }
}
