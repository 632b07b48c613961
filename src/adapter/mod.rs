//! Adapter: registers binding rules with the HTTP router.
//!
//! # Data Flow
//! ```text
//! ServiceRegistry (rule → service, built at startup)
//!     → Adapter::bind_rules (validate, dispatch on method)
//!     → axum Router (one MethodRouter per rule)
//!     → Adapter::start (engine layers, serve until stopped)
//! ```
//!
//! # Design Decisions
//! - Rules are validated before any route is registered
//! - Duplicate (method, path) pairs are a startup error
//! - The owning application is required to build the router, so the
//!   adapter cannot serve without one

pub mod registry;
pub mod server;

use crate::binding::{Method, RuleError};

pub use registry::ServiceRegistry;
pub use server::{Adapter, AdapterState};

/// Errors raised while binding rules or running the adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("invalid binding {method} {path}: {source}")]
    InvalidRule {
        method: Method,
        path: String,
        #[source]
        source: RuleError,
    },
    #[error("route {method} {path} is bound more than once")]
    DuplicateRoute { method: Method, path: String },
    #[error("adapter has been stopped")]
    Stopped,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
