//! Binding rules: how one business service is reachable over HTTP.
//!
//! # Data Flow
//! ```text
//! BindingRule::new(method, path, params, error_mapping)   (startup)
//!     → BindingRule::validate()
//!     → Method dispatch table (verb router + extraction strategy)
//!     → registered with the HTTP router by the adapter
//! ```
//!
//! # Design Decisions
//! - Rules are immutable once built and shared read-only across requests
//! - Methods form a closed enum; unknown verbs fail at startup
//! - Error mappings are keyed by `ErrorKind`, never by error text

pub mod method;
pub mod rule;

pub use method::{Extraction, Method};
pub use rule::{BindingRule, ErrorMapping, RuleError};
