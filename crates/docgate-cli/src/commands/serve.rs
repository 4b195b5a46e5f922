//! Serve command
//!
//! Usage: docgate serve [--config <PATH>] [--json-logs]
//!
//! Wires the bus, starts the in-memory persistor at the configured
//! backend address, then starts the gateway against it. The persistor
//! is started first: the gateway refuses to come up without a backend
//! endpoint.

use std::path::PathBuf;

use clap::Args;

use docgate_core::logging_facility::{init, Profile};
use docgate_core::{Bus, Gateway, GatewayConfig};
use docgate_persistor_mem::MemoryPersistor;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit JSON logs instead of human-readable output
    #[arg(long)]
    pub json_logs: bool,
}

/// Execute serve command
pub fn execute(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(if args.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let config = match &args.config {
        Some(path) => GatewayConfig::from_path(path)?,
        None => GatewayConfig::default(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bus = Bus::new();

    let persistor_task =
        MemoryPersistor::new(bus.clone(), config.backend_address.clone()).start()?;
    let gateway_task = Gateway::new(bus, config).start()?;

    tracing::info!("docgate serving; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    gateway_task.abort();
    persistor_task.abort();
    Ok(())
}
