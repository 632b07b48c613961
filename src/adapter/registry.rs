//! Rule → service registry handed to the adapter.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::routing::MethodRouter;

use crate::adapter::AdapterState;
use crate::binding::BindingRule;
use crate::pipeline;
use crate::service::BusinessService;

/// A rule paired with the service it exposes, with the service type erased.
pub(crate) trait Binding: Send + Sync {
    fn rule(&self) -> &BindingRule;

    /// Build the method router that runs the pipeline for this binding.
    fn into_route(self: Box<Self>) -> (BindingRule, MethodRouter<AdapterState>);
}

struct ServiceBinding<S> {
    rule: BindingRule,
    service: S,
}

impl<S: BusinessService> Binding for ServiceBinding<S> {
    fn rule(&self) -> &BindingRule {
        &self.rule
    }

    fn into_route(self: Box<Self>) -> (BindingRule, MethodRouter<AdapterState>) {
        let ServiceBinding { rule, service } = *self;
        let shared_rule = Arc::new(rule.clone());
        let service = Arc::new(service);

        let route = rule
            .method()
            .route(move |State(state): State<AdapterState>, request: Request| {
                let rule = Arc::clone(&shared_rule);
                let service = Arc::clone(&service);
                async move { pipeline::run(&rule, service.as_ref(), state.app, request).await }
            });
        (rule, route)
    }
}

/// Ordered set of bindings, one service instance per rule.
#[derive(Default)]
pub struct ServiceRegistry {
    pub(crate) bindings: Vec<Box<dyn Binding>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `service` through `rule`. The service is moved in, so an
    /// instance can back only one rule.
    pub fn register<S: BusinessService>(mut self, rule: BindingRule, service: S) -> Self {
        self.bindings.push(Box::new(ServiceBinding { rule, service }));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &BindingRule> {
        self.bindings.iter().map(|b| b.rule())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules()).finish()
    }
}
