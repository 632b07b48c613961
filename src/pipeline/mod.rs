//! Request binding and result translation pipeline.
//!
//! # Data Flow
//! ```text
//! Received
//!     → correlation.rs (resolve correlation id)
//!     → extract.rs     (path/query params, JSON payload)   → ExtractFailed ─┐
//!     → invoke.rs      (ExecutionContext + service call)                    │
//!     → translate.rs   (status, headers, body)             ◀────────────────┘
//!     → Responded
//! ```
//!
//! # Design Decisions
//! - Every request ends in exactly one response, failures included
//! - Status resolution lives in one pure function (status.rs)
//! - Nothing escapes to the transport as an unhandled fault

pub mod correlation;
pub mod extract;
pub mod invoke;
pub mod status;
pub mod translate;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::response::Response;
use tracing::Instrument;

use crate::binding::BindingRule;
use crate::observability::metrics;
use crate::service::{Application, BusinessService, ExecutionContext, ServiceResult};

pub use correlation::{resolve_correlation_id, CORRELATION_ID};
pub use status::resolve_status;

/// Serve one request for `service` as declared by `rule`.
pub async fn run<S: BusinessService>(
    rule: &BindingRule,
    service: &S,
    app: Arc<Application>,
    request: Request,
) -> Response {
    let start = Instant::now();
    let (mut parts, body) = request.into_parts();
    let correlation_id = resolve_correlation_id(&parts.headers);

    let span = tracing::debug_span!(
        "binding",
        method = %rule.method(),
        path = %rule.path(),
        correlation_id = %correlation_id
    );

    async move {
        let response = match extract::extract::<S::Request>(rule, &mut parts, body).await {
            Ok(params) => {
                let ctx = ExecutionContext::new(correlation_id, app);
                let result = invoke::invoke(service, ctx, params).await;
                translate::translate(result, rule.error_mapping())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Request rejected before invocation");
                let result = ServiceResult::<S::Response>::failure(err);
                translate::translate(result, rule.error_mapping())
            }
        };

        metrics::record_request(
            rule.method().as_str(),
            rule.path(),
            response.status().as_u16(),
            start,
        );
        response
    }
    .instrument(span)
    .await
}
