//! Per-request execution context and the owning application.

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The long-lived application that owns the adapter.
///
/// Shared read-only by every request for the lifetime of the process.
#[derive(Debug)]
pub struct Application {
    name: String,
    version: String,
    started_at: Instant,
}

impl Application {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            started_at: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Time elapsed since the application was created.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Values threaded through one service invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    correlation_id: String,
    app: Arc<Application>,
}

impl ExecutionContext {
    pub fn new(correlation_id: impl Into<String>, app: Arc<Application>) -> Self {
        let correlation_id = correlation_id.into();
        debug_assert!(!correlation_id.trim().is_empty(), "correlation id must not be blank");
        Self { correlation_id, app }
    }

    /// Correlation id supplied by the caller or generated for this request.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn app(&self) -> &Arc<Application> {
        &self.app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_shares_application() {
        let app = Arc::new(Application::new("billing", "1.2.0"));
        let ctx = ExecutionContext::new("abc-123", app.clone());

        assert_eq!(ctx.correlation_id(), "abc-123");
        assert_eq!(ctx.app().name(), "billing");
        assert_eq!(ctx.app().version(), "1.2.0");
        assert!(Arc::ptr_eq(ctx.app(), &app));
    }
}
