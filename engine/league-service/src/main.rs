//! League Service entry point
//!
//! Loads configuration, seeds the configured leagues, starts the waiver scheduler and
//! waits for a shutdown signal.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use league_service::{
    config::save_config, graceful_shutdown, initialize_logging, install_metrics_exporter,
    load_configuration, setup_signal_handlers, ServiceState,
};

#[derive(Parser, Debug)]
#[command(name = "league-service")]
#[command(about = "Fantasy league draft and waiver service")]
#[command(version)]
struct Args {
    /// TOML configuration file; LEAGUE_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player catalog JSON, overriding catalog.path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(catalog) = args.catalog {
        config.catalog.path = Some(catalog);
    }

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config).context("Failed to render configuration")?);
        return Ok(());
    }
    if let Some(path) = &args.save_config {
        save_config(&config, path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    // Initialize logging before any component starts
    let _log_guard = initialize_logging(&config.logging)?;

    info!("Starting League Service v{}", env!("CARGO_PKG_VERSION"));

    if config.metrics.enabled {
        install_metrics_exporter(config.metrics.port)?;
    }

    // Create service state
    let service_state = Arc::new(ServiceState::new(config).await?);
    info!("Service state initialized ({:?})", service_state.health_check());

    // Setup signal handlers for graceful shutdown
    let mut shutdown_signal = setup_signal_handlers()?;
    info!("Signal handlers configured");

    let scheduler_handle = service_state.start_waiver_scheduler()?;

    // Forward events to the log until shutdown; downstream delivery subscribes the same way
    let mut events = service_state.subscribe_events();
    let event_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!("Event: {} (league {})", event.event_type(), event.league_id()),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    error!("Event subscriber lagged, skipped {} events", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Wait for shutdown signal
    info!("League Service is running. Press Ctrl+C to shutdown gracefully.");
    let _ = shutdown_signal.recv().await;

    info!("Shutdown signal received. Initiating graceful shutdown...");
    graceful_shutdown(service_state, scheduler_handle).await?;
    event_task.abort();

    info!("League Service shutdown complete");
    Ok(())
}
