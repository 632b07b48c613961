//! Parameter and payload extraction.
//!
//! # Responsibilities
//! - Read each declared parameter from the path, falling back to the query
//! - Decode the JSON body into the service's payload type on mutating routes
//!
//! # Design Decisions
//! - Ordinary parameters never fail; missing values become `""`
//! - A body that does not decode is a `BadPayload` error and the service is
//!   not invoked

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequestParts, Query, RawPathParams};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::binding::{BindingRule, Extraction};
use crate::service::{Params, ServiceError};

/// Extract parameters (and the payload, when the method carries one).
pub async fn extract<P: DeserializeOwned>(
    rule: &BindingRule,
    parts: &mut Parts,
    body: Body,
) -> Result<Params<P>, ServiceError> {
    let path = path_params(parts).await;
    let query = query_params(parts);
    let mut params = named_params(rule.params(), &path, &query);

    if rule.method().extraction() == Extraction::ParamsAndPayload {
        // The body limit layer bounds the read. Past the limit a chunked body
        // errors here and becomes a bad payload.
        let bytes = to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ServiceError::bad_payload(format!("failed to read body: {e}")))?;
        params.set_payload(payload(&bytes)?);
    }

    Ok(params)
}

/// Resolve each declared name: trimmed path value first, then trimmed
/// query value, else empty.
pub fn named_params<P>(
    names: &[String],
    path: &HashMap<String, String>,
    query: &HashMap<String, String>,
) -> Params<P> {
    let mut params = Params::new();
    for name in names {
        let value = non_blank(path.get(name))
            .or_else(|| non_blank(query.get(name)))
            .unwrap_or_default();
        params.insert(name.as_str(), value);
    }
    params
}

/// Decode a request body into the declared payload type.
pub fn payload<P: DeserializeOwned>(bytes: &[u8]) -> Result<P, ServiceError> {
    serde_json::from_slice(bytes).map_err(|e| ServiceError::bad_payload(e.to_string()))
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

async fn path_params(parts: &mut Parts) -> HashMap<String, String> {
    match RawPathParams::from_request_parts(parts, &()).await {
        Ok(raw) => raw
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
        Err(_) => HashMap::new(),
    }
}

fn query_params(parts: &Parts) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    use crate::binding::{ErrorMapping, Method};
    use crate::service::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewUser {
        name: String,
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_path_param_preferred() {
        let params: Params<()> =
            named_params(&names(&["id"]), &map(&[("id", "42")]), &map(&[("id", "7")]));
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn test_blank_path_falls_back_to_query() {
        let params: Params<()> =
            named_params(&names(&["id"]), &map(&[("id", "  ")]), &map(&[("id", " 7 ")]));
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_missing_everywhere_is_empty() {
        let params: Params<()> = named_params(&names(&["id", "q"]), &map(&[]), &map(&[]));
        assert_eq!(params.get("id"), Some(""));
        assert_eq!(params.get("q"), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_payload_decodes() {
        let user: NewUser = payload(br#"{"name":"x"}"#).unwrap();
        assert_eq!(user, NewUser { name: "x".into() });
    }

    #[test]
    fn test_malformed_payload_is_bad_payload() {
        let err = payload::<NewUser>(b"{name:").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadPayload);
    }

    #[tokio::test]
    async fn test_extract_reads_query_and_body() {
        let rule = BindingRule::new(Method::Post, "/users", ["team"], ErrorMapping::new());
        let request = Request::builder()
            .method("POST")
            .uri("/users?team=core")
            .body(Body::from(r#"{"name":"ada"}"#))
            .unwrap();
        let (mut parts, body) = request.into_parts();

        let params = extract::<NewUser>(&rule, &mut parts, body).await.unwrap();
        assert_eq!(params.get("team"), Some("core"));
        assert_eq!(params.payload(), Some(&NewUser { name: "ada".into() }));
    }

    #[tokio::test]
    async fn test_extract_ignores_body_on_get() {
        let rule = BindingRule::new(Method::Get, "/users", ["id"], ErrorMapping::new());
        let request = Request::builder()
            .uri("/users?id=9")
            .body(Body::from("not json"))
            .unwrap();
        let (mut parts, body) = request.into_parts();

        let params = extract::<NewUser>(&rule, &mut parts, body).await.unwrap();
        assert_eq!(params.get("id"), Some("9"));
        assert!(params.payload().is_none());
    }

    #[tokio::test]
    async fn test_extract_empty_body_is_bad_payload() {
        let rule = BindingRule::new(Method::Put, "/users", Vec::<String>::new(), ErrorMapping::new());
        let request = Request::builder()
            .method("PUT")
            .uri("/users")
            .body(Body::empty())
            .unwrap();
        let (mut parts, body) = request.into_parts();

        let err = extract::<NewUser>(&rule, &mut parts, body).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadPayload);
    }
}
