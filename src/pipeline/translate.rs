//! Translation of a service result into an HTTP response.
//!
//! # Responsibilities
//! - Error path: status only, no headers, no body
//! - Success path: status, stringified headers, JSON body
//!
//! # Design Decisions
//! - Integers render as decimal, floats with two fraction digits
//! - An unrenderable header aborts with 500 and the error text as body
//! - A body that fails to serialize downgrades to 500 with no body

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::binding::ErrorMapping;
use crate::pipeline::status::resolve_status;
use crate::service::ServiceResult;

/// Errors raised while rendering a successful result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("header `{name}` has unsupported value type {kind}; only strings and numbers are allowed")]
    UnsupportedHeaderValue { name: String, kind: &'static str },
    #[error("invalid header name `{0}`")]
    InvalidHeaderName(String),
    #[error("header `{0}` has a value that cannot be sent")]
    InvalidHeaderValue(String),
}

/// Render a service result onto a fresh response.
pub fn translate<T: Serialize>(result: ServiceResult<T>, mapping: &ErrorMapping) -> Response {
    let status = resolve_status(result.error.as_ref(), result.code, mapping);

    if result.error.is_some() {
        return status.into_response();
    }

    let mut response = status.into_response();

    for (name, value) in &result.headers {
        match header_pair(name, value) {
            Ok((name, value)) => {
                response.headers_mut().insert(name, value);
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to render response header");
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                *response.body_mut() = Body::from(err.to_string());
                return response;
            }
        }
    }

    if let Some(body) = &result.response {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                *response.body_mut() = Body::from(bytes);
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response body");
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            }
        }
    }

    response
}

/// Render a header value as text.
pub fn header_to_string(name: &str, value: &Value) -> Result<String, TranslateError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                Ok(format!("{:.2}", n.as_f64().unwrap_or_default()))
            }
        }
        other => Err(TranslateError::UnsupportedHeaderValue {
            name: name.to_string(),
            kind: value_kind(other),
        }),
    }
}

fn header_pair(name: &str, value: &Value) -> Result<(HeaderName, HeaderValue), TranslateError> {
    let text = header_to_string(name, value)?;
    let header_name = HeaderName::try_from(name)
        .map_err(|_| TranslateError::InvalidHeaderName(name.to_string()))?;
    let header_value = HeaderValue::try_from(text)
        .map_err(|_| TranslateError::InvalidHeaderValue(name.to_string()))?;
    Ok((header_name, header_value))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;
    use std::collections::BTreeMap;

    use crate::service::{ErrorKind, ServiceError};

    async fn body_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_header_stringification() {
        assert_eq!(header_to_string("a", &json!(200)).unwrap(), "200");
        assert_eq!(header_to_string("a", &json!(-5)).unwrap(), "-5");
        assert_eq!(header_to_string("a", &json!(3.14159)).unwrap(), "3.14");
        assert_eq!(header_to_string("a", &json!(2.0)).unwrap(), "2.00");
        assert_eq!(header_to_string("a", &json!("text")).unwrap(), "text");
        assert!(matches!(
            header_to_string("a", &json!({"nested": 1})),
            Err(TranslateError::UnsupportedHeaderValue { kind: "object", .. })
        ));
        assert!(header_to_string("a", &json!(true)).is_err());
    }

    #[tokio::test]
    async fn test_error_path_writes_status_only() {
        let mapping = ErrorMapping::new().with(ErrorKind::NotFound, StatusCode::NOT_FOUND);
        let result = ServiceResult::ok(json!({"ignored": true}))
            .with_header("X-Ignored", 1)
            .with_error(ServiceError::not_found("gone"));

        let response = translate(result, &mapping);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("x-ignored").is_none());
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_success_renders_headers_and_json() {
        let result = ServiceResult::ok(json!({"name": "x"}))
            .with_status(StatusCode::CREATED)
            .with_header("X-Count", 200)
            .with_header("X-Ratio", 3.14159)
            .with_header("X-Label", "blue");

        let response = translate(result, &ErrorMapping::new());
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-count"], "200");
        assert_eq!(response.headers()["x-ratio"], "3.14");
        assert_eq!(response.headers()["x-label"], "blue");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_of(response).await, r#"{"name":"x"}"#);
    }

    #[tokio::test]
    async fn test_missing_code_is_500() {
        let result = ServiceResult::new().with_response("hello");
        let response = translate(result, &ErrorMapping::new());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unsupported_header_aborts_with_message() {
        let result = ServiceResult::ok("body").with_header("X-Bad", json!({"a": 1}));

        let response = translate(result, &ErrorMapping::new());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        let body = body_of(response).await;
        assert!(body.contains("X-Bad"), "unexpected body: {body}");
    }

    #[tokio::test]
    async fn test_invalid_header_name_aborts() {
        let result = ServiceResult::ok("body").with_header("bad header", "v");
        let response = translate(result, &ErrorMapping::new());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_serialization_failure_drops_body() {
        let mut unserializable = BTreeMap::new();
        unserializable.insert(vec![1u8], 1u8);
        let result = ServiceResult::ok(unserializable);

        let response = translate(result, &ErrorMapping::new());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(response).await.is_empty());
    }
}
