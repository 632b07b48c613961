//! Shared services and helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceExt;

use service_adapter::{
    Adapter, AdapterConfig, Application, BusinessService, ExecutionContext, Params, ServiceError,
    ServiceRegistry, ServiceResult,
};

/// Returns every declared parameter plus the correlation id.
pub struct EchoParams {
    pub names: Vec<&'static str>,
}

impl BusinessService for EchoParams {
    type Request = ();
    type Response = Value;

    async fn execute(&self, ctx: ExecutionContext, params: Params<()>) -> ServiceResult<Value> {
        let mut body = serde_json::Map::new();
        for name in &self.names {
            if let Some(value) = params.get(name) {
                body.insert(name.to_string(), json!(value));
            }
        }
        body.insert("correlation_id".into(), json!(ctx.correlation_id()));
        body.insert("app".into(), json!(ctx.app().name()));
        ServiceResult::ok(Value::Object(body))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NewUser {
    pub name: String,
}

/// Creates users from the payload and counts invocations.
#[derive(Clone, Default)]
pub struct CreateUser {
    pub calls: Arc<AtomicUsize>,
}

impl BusinessService for CreateUser {
    type Request = NewUser;
    type Response = Value;

    async fn execute(&self, _ctx: ExecutionContext, params: Params<NewUser>) -> ServiceResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let team = params.get_or_empty("team").to_string();
        match params.into_payload() {
            Some(user) => ServiceResult::ok(json!({ "name": user.name, "team": team }))
                .with_status(StatusCode::CREATED),
            None => ServiceResult::failure(ServiceError::bad_payload("missing")),
        }
    }
}

/// Always fails with the configured error and optional status.
pub struct Fails {
    pub error: ServiceError,
    pub code: Option<StatusCode>,
}

impl BusinessService for Fails {
    type Request = ();
    type Response = Value;

    async fn execute(&self, _ctx: ExecutionContext, _params: Params<()>) -> ServiceResult<Value> {
        let result = ServiceResult::new()
            .with_response(json!({ "should": "not render" }))
            .with_header("X-Should-Not-Render", 1)
            .with_error(self.error.clone());
        match self.code {
            Some(code) => result.with_status(code),
            None => result,
        }
    }
}

/// Succeeds with the configured headers.
pub struct WithHeaders {
    pub headers: BTreeMap<String, Value>,
}

impl BusinessService for WithHeaders {
    type Request = ();
    type Response = Value;

    async fn execute(&self, _ctx: ExecutionContext, _params: Params<()>) -> ServiceResult<Value> {
        let mut result = ServiceResult::ok(json!({ "ok": true }));
        result.headers = self.headers.clone();
        result
    }
}

pub fn app() -> Arc<Application> {
    Arc::new(Application::new("test-app", "0.0.1"))
}

/// Bind `registry` on a default-configured adapter and return its router.
pub fn router(registry: ServiceRegistry) -> Router {
    let mut adapter = Adapter::new(AdapterConfig::default());
    adapter.bind_rules(registry).expect("rules should bind");
    adapter.router(app())
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }
}

pub async fn send(router: Router, request: Request<Body>) -> Reply {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply { status, headers, body }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
