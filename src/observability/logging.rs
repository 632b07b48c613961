//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "service_adapter=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `log_level` may be a bare level (`info`) or a full filter directive.
pub fn init(log_level: &str) {
    let fallback = if log_level.trim().is_empty() {
        DEFAULT_FILTER.to_string()
    } else {
        log_level.to_string()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(err) = result {
        tracing::warn!(error = %err, "Tracing subscriber already installed");
    }
}
