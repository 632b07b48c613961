//! Business-service contract.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → pipeline::extract   (Params<S::Request>)
//!     → S::execute          (ExecutionContext, Params) → ServiceResult<S::Response>
//!     → pipeline::translate (status, headers, JSON body)
//! ```
//!
//! # Design Decisions
//! - The service declares its payload shape as an associated type; the
//!   pipeline never invents one
//! - The execution context is an explicit argument, not a value bag
//! - Errors carry a closed `ErrorKind` so status mapping is exhaustive

pub mod context;
pub mod error;
pub mod params;
pub mod result;

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};

pub use context::{Application, ExecutionContext};
pub use error::{ErrorKind, ServiceError};
pub use params::{Params, PAYLOAD};
pub use result::ServiceResult;

/// A unit of business logic reachable through a binding rule.
///
/// Services that do not accept a body can use `()` as their request type;
/// it is never deserialized for read-only methods.
pub trait BusinessService: Send + Sync + 'static {
    /// Payload shape expected on mutating routes.
    type Request: DeserializeOwned + Send + 'static;

    /// Success payload rendered as the JSON response body.
    type Response: Serialize + Send + 'static;

    /// Run the service for one request.
    fn execute(
        &self,
        ctx: ExecutionContext,
        params: Params<Self::Request>,
    ) -> impl Future<Output = ServiceResult<Self::Response>> + Send;
}
