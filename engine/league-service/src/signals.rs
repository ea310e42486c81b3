//! Signal handling for graceful shutdown

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::service::ServiceState;

/// Setup signal handlers for graceful shutdown
///
/// The receiver yields once for the first Ctrl+C or SIGTERM.
pub fn setup_signal_handlers() -> Result<mpsc::Receiver<()>> {
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

    // Handle Ctrl+C (SIGINT)
    let ctrl_c_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C signal: {}", e);
            return;
        }

        info!("Ctrl+C signal received");
        let _ = ctrl_c_tx.try_send(());
    });

    // Handle SIGTERM (Unix only)
    #[cfg(unix)]
    {
        use signal_hook::consts::SIGTERM;

        let shutdown_flag = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown_flag))?;

        tokio::spawn(async move {
            // Poll for signal
            while !shutdown_flag.load(Ordering::Relaxed) {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            info!("SIGTERM signal received");
            let _ = shutdown_tx.try_send(());
        });
    }

    Ok(shutdown_rx)
}

/// Graceful shutdown handler
///
/// Stops the waiver scheduler and cancels every pending pick timer.
pub async fn graceful_shutdown(
    service_state: Arc<ServiceState>,
    scheduler_handle: Option<JoinHandle<()>>,
) -> Result<()> {
    info!("Starting graceful shutdown...");

    let cancelled = service_state.shutdown();
    info!("Cancelled {} pick timers", cancelled);

    if let Some(handle) = scheduler_handle {
        let shutdown_timeout = Duration::from_secs(service_state.config.service.shutdown_timeout_secs);
        match timeout(shutdown_timeout, handle).await {
            Ok(Ok(())) => {
                info!("Waiver scheduler stopped gracefully");
            }
            Ok(Err(e)) => {
                error!("Waiver scheduler task failed: {}", e);
            }
            Err(_) => {
                warn!("Waiver scheduler did not stop within timeout, forcing shutdown");
            }
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}
