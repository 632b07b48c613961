//! Service Adapter demo server.
//!
//! Exposes an in-memory greetings API through binding rules.
//!
//! ```text
//!   Client ──▶ axum router ──▶ extract ──▶ invoke service ──▶ translate ──▶ Client
//! ```

mod greetings;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use service_adapter::config::{load_config, load_from_env, validate_config, AdapterConfig, ConfigError};
use service_adapter::lifecycle::signals::shutdown_on_ctrl_c;
use service_adapter::observability::{logging, metrics};
use service_adapter::{Adapter, Application};

#[derive(Parser)]
#[command(name = "service-adapter")]
#[command(about = "Expose business services over HTTP through binding rules", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: AdapterConfig = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("service-adapter v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_concurrency = config.listener.max_concurrency,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let app = Arc::new(Application::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let mut adapter = Adapter::new(config);
    adapter.bind_rules(greetings::registry())?;

    tokio::spawn(shutdown_on_ctrl_c(adapter.shutdown()));
    adapter.start(app, listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
