//! Status-code resolution shared by the failure and success paths.

use axum::http::StatusCode;

use crate::binding::ErrorMapping;
use crate::service::ServiceError;

/// Resolve the response status for a service outcome.
///
/// Priority: the rule's mapping for the error kind, then the explicit
/// code, then 500. The mapping is consulted only when there is an error.
pub fn resolve_status(
    error: Option<&ServiceError>,
    code: Option<StatusCode>,
    mapping: &ErrorMapping,
) -> StatusCode {
    error
        .and_then(|err| mapping.status_for(err.kind()))
        .or(code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
