//! # InterRep Backend Runtime
//!
//! Loads configuration, initializes the attestation, account linking and
//! Merkle path subsystems, then runs until Ctrl+C.
//!
//! Logging honours `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ir_03_merkle_paths::known_groups;
use interrep_runtime::{RuntimeConfig, ServiceContainer};

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    if let Err(e) = config.validate_for_production() {
        warn!("Configuration is not production-ready: {}", e);
    }

    info!("===========================================");
    info!("  InterRep Backend Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container =
        ServiceContainer::new(config).context("Failed to initialize service container")?;

    let groups = known_groups();
    info!(
        groups = groups.len(),
        depth = container.trees.depth(),
        "Group registry loaded"
    );
    info!(
        chain_id = container.config.chain.chain_id,
        "All subsystems initialized and running"
    );

    info!("Runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!(
        tokens = container.tokens.len(),
        active_locks = container.account_locks.active(),
        "Shutdown complete"
    );
    Ok(())
}
