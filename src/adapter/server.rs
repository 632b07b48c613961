//! Adapter setup and serving.
//!
//! # Responsibilities
//! - Register each binding rule through the method dispatch table
//! - Wire up engine middleware (access log, limits, timeouts, compression)
//! - Serve on a listener until stopped

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    compression::{CompressionLayer, CompressionLevel},
    limit::RequestBodyLimitLayer,
    timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer},
    trace::TraceLayer,
};

use crate::adapter::{AdapterError, ServiceRegistry};
use crate::binding::Method;
use crate::config::AdapterConfig;
use crate::lifecycle::Shutdown;
use crate::service::Application;

/// Application state injected into every binding handler.
#[derive(Clone)]
pub struct AdapterState {
    pub app: Arc<Application>,
}

/// HTTP adapter exposing business services through binding rules.
pub struct Adapter {
    routes: Router<AdapterState>,
    bound: Vec<(Method, String)>,
    config: AdapterConfig,
    shutdown: Shutdown,
}

impl Adapter {
    /// Create an adapter with no bindings.
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            routes: Router::new(),
            bound: Vec::new(),
            config,
            shutdown: Shutdown::new(),
        }
    }

    /// Validate and register every binding in `registry`.
    ///
    /// Nothing is registered if any rule is invalid or collides with a
    /// route that is already bound.
    pub fn bind_rules(&mut self, registry: ServiceRegistry) -> Result<(), AdapterError> {
        let mut seen: HashSet<(Method, String)> = self.bound.iter().cloned().collect();
        for rule in registry.rules() {
            rule.validate().map_err(|source| AdapterError::InvalidRule {
                method: rule.method(),
                path: rule.path().to_string(),
                source,
            })?;
            if !seen.insert((rule.method(), rule.path().to_string())) {
                return Err(AdapterError::DuplicateRoute {
                    method: rule.method(),
                    path: rule.path().to_string(),
                });
            }
        }

        let mut routes = std::mem::replace(&mut self.routes, Router::new());
        for binding in registry.bindings {
            let (rule, method_router) = binding.into_route();
            tracing::info!(
                method = %rule.method(),
                path = %rule.path(),
                params = ?rule.params(),
                mapped_errors = rule.error_mapping().len(),
                "Binding rule registered"
            );
            routes = routes.route(rule.path(), method_router);
            self.bound.push((rule.method(), rule.path().to_string()));
        }
        self.routes = routes;
        Ok(())
    }

    /// Registered (method, path) pairs in registration order.
    pub fn bindings(&self) -> &[(Method, String)] {
        &self.bound
    }

    /// Build the finished router for `app` with all engine layers applied.
    pub fn router(&self, app: Arc<Application>) -> Router {
        let router = self
            .routes
            .clone()
            .with_state(AdapterState { app })
            .layer(RequestBodyLimitLayer::new(self.config.limits.max_body_bytes))
            .layer(RequestBodyTimeoutLayer::new(self.config.timeouts.read()))
            .layer(ResponseBodyTimeoutLayer::new(self.config.timeouts.write()))
            .layer(GlobalConcurrencyLimitLayer::new(self.config.listener.max_concurrency));

        let router = if self.config.compression {
            router.layer(CompressionLayer::new().quality(CompressionLevel::Fastest))
        } else {
            router
        };

        router.layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until [`Adapter::stop`] is called.
    pub async fn start(&self, app: Arc<Application>, listener: TcpListener) -> Result<(), AdapterError> {
        if self.shutdown.is_triggered() {
            return Err(AdapterError::Stopped);
        }

        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            app = %app.name(),
            version = %app.version(),
            bindings = self.bound.len(),
            compression = self.config.compression,
            "Adapter starting"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router(app))
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("Adapter stopped");
        Ok(())
    }

    /// Stop accepting requests and let in-flight ones drain.
    pub fn stop(&self) {
        tracing::info!("Adapter stop requested");
        self.shutdown.trigger();
    }

    /// Healthy until stopped.
    pub fn check_health(&self) -> Result<(), AdapterError> {
        if self.shutdown.is_triggered() {
            Err(AdapterError::Stopped)
        } else {
            Ok(())
        }
    }

    /// Shutdown handle shared with this adapter.
    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }
}
