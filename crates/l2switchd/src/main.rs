//! l2switchd - Transparent Ethernet learning switch
//!
//! Entry point for the l2switchd daemon. Frames arrive on stdin and leave on
//! stdout; logs go to stderr.

use clap::Parser;
use l2switchd::{Args, Result, Switchd, SwitchdConfig, SwitchdError};
use std::process::ExitCode;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initializes tracing on stderr, honouring RUST_LOG over the configured level
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| SwitchdError::Internal(format!("Failed to set logger: {}", e)))
}

/// Resolves when SIGINT is received
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c, running until stdin closes");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match SwitchdConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("l2switchd: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging.level) {
        eprintln!("l2switchd: {}", e);
        return ExitCode::FAILURE;
    }

    info!("--- Starting l2switchd ---");
    info!(
        interfaces = config.interfaces.len(),
        capacity = config.fdb.capacity,
        queue_depth = config.transport.queue_depth,
        "Configuration loaded"
    );

    let switchd = match Switchd::new(&config) {
        Ok(switchd) => switchd,
        Err(e) => {
            error!(error = %e, "Failed to initialize switch");
            return ExitCode::FAILURE;
        }
    };

    match switchd
        .run(tokio::io::stdin(), tokio::io::stdout(), shutdown_signal())
        .await
    {
        Ok(_) => {
            info!("l2switchd exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "l2switchd terminating");
            ExitCode::FAILURE
        }
    }
}
