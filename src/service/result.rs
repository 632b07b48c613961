//! Structured outcome of a service invocation.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde_json::Value;

use crate::service::ServiceError;

/// Result of a business service invocation.
///
/// When `error` is set the failure path is taken regardless of
/// `response` or `code`. A `code` of `None` means no explicit status;
/// the translator then falls back to 500.
#[derive(Debug)]
pub struct ServiceResult<T> {
    pub response: Option<T>,
    /// Header values must be strings or numbers to be rendered.
    pub headers: BTreeMap<String, Value>,
    pub error: Option<ServiceError>,
    pub code: Option<StatusCode>,
}

impl<T> ServiceResult<T> {
    pub fn new() -> Self {
        Self {
            response: None,
            headers: BTreeMap::new(),
            error: None,
            code: None,
        }
    }

    /// `200 OK` with a response body.
    pub fn ok(response: T) -> Self {
        Self::new().with_response(response).with_status(StatusCode::OK)
    }

    pub fn failure(error: ServiceError) -> Self {
        Self::new().with_error(error)
    }

    pub fn with_response(mut self, response: T) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_error(mut self, error: ServiceError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_status(mut self, code: StatusCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for ServiceResult<T> {
    fn default() -> Self {
        Self::new()
    }
}
