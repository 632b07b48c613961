//! Binding rule and its error mapping.

use std::collections::{HashMap, HashSet};

use axum::http::StatusCode;

use crate::binding::Method;
use crate::service::{ErrorKind, PAYLOAD};

/// Reasons a binding rule is rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown HTTP method `{0}`")]
    UnknownMethod(String),
    #[error("route path is empty")]
    EmptyPath,
    #[error("route path `{0}` must start with `/`")]
    RelativePath(String),
    #[error("route path `{0}` uses `:`/`*` captures; use `{{name}}` or `{{*name}}`")]
    LegacyCapture(String),
    #[error("parameter name `{0}` is reserved for the request payload")]
    ReservedParam(String),
    #[error("parameter `{0}` is declared more than once")]
    DuplicateParam(String),
    #[error("parameter name is blank")]
    BlankParam,
}

/// Maps business error kinds to HTTP status codes.
///
/// At most one status per kind; a later entry replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMapping(HashMap<ErrorKind, StatusCode>);

impl ErrorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.0.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> Option<StatusCode> {
        self.0.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, StatusCode)> + '_ {
        self.0.iter().map(|(k, s)| (*k, *s))
    }
}

impl FromIterator<(ErrorKind, StatusCode)> for ErrorMapping {
    fn from_iter<I: IntoIterator<Item = (ErrorKind, StatusCode)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Declaration of how one service is exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRule {
    method: Method,
    path: String,
    params: Vec<String>,
    error_mapping: ErrorMapping,
}

impl BindingRule {
    pub fn new<I, P>(
        method: Method,
        path: impl Into<String>,
        params: I,
        error_mapping: ErrorMapping,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            method,
            path: path.into(),
            params: params.into_iter().map(Into::into).collect(),
            error_mapping,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Route template in the router's `{name}` syntax.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared parameter names, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn error_mapping(&self) -> &ErrorMapping {
        &self.error_mapping
    }

    /// Check the rule before it is registered with the router.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.path.is_empty() {
            return Err(RuleError::EmptyPath);
        }
        if !self.path.starts_with('/') {
            return Err(RuleError::RelativePath(self.path.clone()));
        }
        if self
            .path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(RuleError::LegacyCapture(self.path.clone()));
        }

        let mut seen = HashSet::new();
        for name in &self.params {
            if name.trim().is_empty() {
                return Err(RuleError::BlankParam);
            }
            if name == PAYLOAD {
                return Err(RuleError::ReservedParam(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(RuleError::DuplicateParam(name.clone()));
            }
        }
        Ok(())
    }
}
