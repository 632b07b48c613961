//! Service invocation.

use crate::service::{BusinessService, ExecutionContext, Params, ServiceResult};

/// Run `service` with the given context and parameters.
///
/// No retry or timeout is applied here; a slow service holds only its
/// own request.
pub async fn invoke<S: BusinessService>(
    service: &S,
    ctx: ExecutionContext,
    params: Params<S::Request>,
) -> ServiceResult<S::Response> {
    tracing::debug!(params = params.len(), "Invoking service");

    let result = service.execute(ctx, params).await;

    match &result.error {
        Some(err) => tracing::debug!(
            kind = %err.kind(),
            error = %err.message,
            code = ?result.code,
            "Service returned error"
        ),
        None => tracing::debug!(code = ?result.code, "Service completed"),
    }
    result
}
