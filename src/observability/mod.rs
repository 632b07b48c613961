//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline produces:
//!     → logging.rs (structured log events, correlation id on every span)
//!     → metrics.rs (request counters and latency histograms per binding)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
