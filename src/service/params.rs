//! Parameters extracted from an inbound request.

use std::collections::HashMap;

/// Reserved name under which the decoded request body is carried.
///
/// Binding rules may not declare a parameter with this name.
pub const PAYLOAD: &str = "payload";

/// Named string parameters plus the optional decoded payload.
///
/// Created fresh for every request. Every name declared by the binding
/// rule has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Params<P> {
    values: HashMap<String, String>,
    payload: Option<P>,
}

impl<P> Params<P> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            payload: None,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    pub(crate) fn set_payload(&mut self, payload: P) {
        self.payload = Some(payload);
    }

    /// Value of a named parameter, if it was declared.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a named parameter, or `""` when absent.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<P> {
        self.payload
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<P> Default for Params<P> {
    fn default() -> Self {
        Self::new()
    }
}
