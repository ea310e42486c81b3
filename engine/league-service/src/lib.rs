//! League Service
//!
//! Hosts the draft and waiver engines over a shared roster store and player catalog,
//! including configuration management, component initialization, the weekly waiver
//! scheduler and graceful shutdown handling.

use anyhow::{Context, Result};
use std::path::Path;

pub mod config;
pub mod logging;
pub mod service;
pub mod signals;

pub use config::ServiceConfig;
pub use logging::initialize_logging;
pub use service::{install_metrics_exporter, ServiceHealth, ServiceState};
pub use signals::{graceful_shutdown, setup_signal_handlers};

/// Load configuration from an optional file and environment variables
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(path).context("Failed to load service configuration")
}
