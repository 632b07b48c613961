//! In-memory greetings services used by the demo binary.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use service_adapter::{
    BindingRule, BusinessService, ErrorKind, ErrorMapping, ExecutionContext, Method, Params,
    ServiceError, ServiceRegistry, ServiceResult,
};

#[derive(Debug, Clone, Serialize)]
pub struct Greeting {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NewGreeting {
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default)]
pub struct GreetingStore {
    greetings: RwLock<BTreeMap<String, Greeting>>,
}

impl GreetingStore {
    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Greeting>>, ServiceError> {
        self.greetings.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Greeting>>, ServiceError> {
        self.greetings.write().map_err(|_| poisoned())
    }

    fn get(&self, name: &str) -> Result<Option<Greeting>, ServiceError> {
        Ok(self.read()?.get(name).cloned())
    }
}

fn poisoned() -> ServiceError {
    tracing::error!("Greeting store lock poisoned");
    ServiceError::internal("greeting store unavailable")
}

pub struct GetGreeting(Arc<GreetingStore>);

impl BusinessService for GetGreeting {
    type Request = ();
    type Response = Greeting;

    async fn execute(&self, ctx: ExecutionContext, params: Params<()>) -> ServiceResult<Greeting> {
        let name = params.get_or_empty("name");
        let stored = match self.0.get(name) {
            Ok(stored) => stored,
            Err(e) => return ServiceResult::failure(e),
        };
        let greeting = stored.unwrap_or_else(|| Greeting {
            name: name.to_string(),
            message: format!("Hello, {name}!"),
        });
        ServiceResult::ok(greeting)
            .with_header("X-Correlation-Id", ctx.correlation_id())
            .with_header("X-App-Uptime", ctx.app().uptime().as_secs_f64())
    }
}

pub struct ListGreetings(Arc<GreetingStore>);

impl BusinessService for ListGreetings {
    type Request = ();
    type Response = Vec<Greeting>;

    async fn execute(&self, _ctx: ExecutionContext, params: Params<()>) -> ServiceResult<Vec<Greeting>> {
        let prefix = params.get_or_empty("prefix");
        let store = match self.0.read() {
            Ok(store) => store,
            Err(e) => return ServiceResult::failure(e),
        };
        let greetings: Vec<Greeting> = store
            .values()
            .filter(|g| g.name.starts_with(prefix))
            .cloned()
            .collect();
        let count = greetings.len() as u64;
        ServiceResult::ok(greetings).with_header("X-Total-Count", count)
    }
}

pub struct CreateGreeting(Arc<GreetingStore>);

impl BusinessService for CreateGreeting {
    type Request = NewGreeting;
    type Response = Greeting;

    async fn execute(&self, _ctx: ExecutionContext, params: Params<NewGreeting>) -> ServiceResult<Greeting> {
        let Some(new) = params.into_payload() else {
            return ServiceResult::failure(ServiceError::bad_payload("missing body"));
        };
        if new.name.trim().is_empty() {
            return ServiceResult::failure(ServiceError::invalid_argument("name is required"));
        }

        let mut greetings = match self.0.write() {
            Ok(greetings) => greetings,
            Err(e) => return ServiceResult::failure(e),
        };
        if greetings.contains_key(&new.name) {
            return ServiceResult::failure(ServiceError::new(
                ErrorKind::AlreadyExists,
                format!("greeting for {} exists", new.name),
            ));
        }

        let greeting = Greeting {
            message: new.message.unwrap_or_else(|| format!("Hello, {}!", new.name)),
            name: new.name,
        };
        greetings.insert(greeting.name.clone(), greeting.clone());
        ServiceResult::ok(greeting).with_status(StatusCode::CREATED)
    }
}

pub struct DeleteGreeting(Arc<GreetingStore>);

impl BusinessService for DeleteGreeting {
    type Request = ();
    type Response = ();

    async fn execute(&self, _ctx: ExecutionContext, params: Params<()>) -> ServiceResult<()> {
        let name = params.get_or_empty("name");
        let removed = match self.0.write() {
            Ok(mut greetings) => greetings.remove(name),
            Err(e) => return ServiceResult::failure(e),
        };
        match removed {
            Some(_) => ServiceResult::new().with_status(StatusCode::NO_CONTENT),
            None => ServiceResult::failure(ServiceError::not_found(format!("no greeting for {name}"))),
        }
    }
}

/// Rules and services for the greetings API.
pub fn registry() -> ServiceRegistry {
    let store = Arc::new(GreetingStore::default());
    let errors = ErrorMapping::new()
        .with(ErrorKind::BadPayload, StatusCode::BAD_REQUEST)
        .with(ErrorKind::InvalidArgument, StatusCode::UNPROCESSABLE_ENTITY)
        .with(ErrorKind::AlreadyExists, StatusCode::CONFLICT)
        .with(ErrorKind::NotFound, StatusCode::NOT_FOUND);

    ServiceRegistry::new()
        .register(
            BindingRule::new(Method::Get, "/greetings", ["prefix"], errors.clone()),
            ListGreetings(store.clone()),
        )
        .register(
            BindingRule::new(Method::Get, "/greetings/{name}", ["name"], errors.clone()),
            GetGreeting(store.clone()),
        )
        .register(
            BindingRule::new(Method::Post, "/greetings", Vec::<String>::new(), errors.clone()),
            CreateGreeting(store.clone()),
        )
        .register(
            BindingRule::new(Method::Delete, "/greetings/{name}", ["name"], errors),
            DeleteGreeting(store),
        )
}
