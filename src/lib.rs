//! Service Adapter Library
//!
//! Binds business services to HTTP routes through declarative binding rules.

pub mod adapter;
pub mod binding;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod service;

pub use adapter::{Adapter, AdapterError, ServiceRegistry};
pub use binding::{BindingRule, ErrorMapping, Method};
pub use config::AdapterConfig;
pub use lifecycle::Shutdown;
pub use service::{
    Application, BusinessService, ErrorKind, ExecutionContext, Params, ServiceError, ServiceResult,
};
