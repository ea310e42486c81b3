//! Configuration for the draft engine

use chrono::{DateTime, Utc};
use roster_store::RetryConfig;
use serde::{Deserialize, Serialize};

use crate::auto_pick::PositionCaps;
use crate::types::DraftType;

/// Per-draft settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub draft_type: DraftType,
    pub rounds: u32,

    /// Seconds each team has to make its pick
    pub pick_duration_secs: u64,

    pub auto_pick_enabled: bool,

    /// Grace seconds after the deadline before auto-pick fires
    pub auto_pick_threshold_secs: u64,

    /// Informational; drafts are started explicitly
    pub scheduled_start: Option<DateTime<Utc>>,

    pub is_mock: bool,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            draft_type: DraftType::Snake,
            rounds: 15,
            pick_duration_secs: 120,
            auto_pick_enabled: true,
            auto_pick_threshold_secs: 30,
            scheduled_start: None,
            is_mock: false,
        }
    }
}

impl DraftConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.rounds == 0 {
            return Err("rounds must be greater than 0".to_string());
        }
        if self.pick_duration_secs == 0 {
            return Err("pick_duration_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// DraftEngine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftEngineConfig {
    /// Settings used when a draft is created without its own
    pub defaults: DraftConfig,

    pub position_caps: PositionCaps,

    /// Bound on each catalog or store call
    pub io_timeout_ms: u64,

    /// Backoff for transient auto-pick failures
    pub retry: RetryConfig,
}

impl Default for DraftEngineConfig {
    fn default() -> Self {
        Self {
            defaults: DraftConfig::default(),
            position_caps: PositionCaps::default(),
            io_timeout_ms: 2_000,
            retry: RetryConfig::default(),
        }
    }
}

impl DraftEngineConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse::<u64>("DRAFT_PICK_DURATION_SECS") {
            config.defaults.pick_duration_secs = v;
        }
        if let Some(v) = env_parse::<u32>("DRAFT_ROUNDS") {
            config.defaults.rounds = v;
        }
        if let Some(v) = env_parse::<bool>("DRAFT_AUTO_PICK_ENABLED") {
            config.defaults.auto_pick_enabled = v;
        }
        if let Some(v) = env_parse::<u64>("DRAFT_IO_TIMEOUT_MS") {
            config.io_timeout_ms = v;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
