//! Configuration for the roster store

use serde::{Deserialize, Serialize};

/// Roster store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterStoreConfig {
    /// Capacity used when a team is registered without one
    pub default_capacity: usize,
}

impl Default for RosterStoreConfig {
    fn default() -> Self {
        Self { default_capacity: 16 }
    }
}

impl RosterStoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let default_capacity = std::env::var("ROSTER_DEFAULT_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(16);

        Self { default_capacity }
    }
}
