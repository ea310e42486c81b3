//! Service configuration management

use anyhow::{Context, Result};
use draft_engine::DraftEngineConfig;
use roster_store::{LeagueId, RosterStoreConfig, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use waiver_engine::{PriorityPolicyKind, WaiverEngineConfig};

/// Prefix for environment overrides, e.g. `LEAGUE_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "LEAGUE";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service-level configuration
    pub service: ServiceSettings,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,

    /// Player catalog source
    pub catalog: CatalogConfig,

    pub roster: RosterStoreConfig,
    pub draft: DraftEngineConfig,
    pub waiver: WaiverEngineConfig,

    /// Leagues registered at startup
    pub leagues: Vec<LeagueSeed>,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Capacity of the event broadcast channel
    pub event_buffer: usize,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,

    /// Directory for daily-rolling log files (if None, logs to stdout only)
    pub directory: Option<PathBuf>,

    pub file_prefix: String,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Install the Prometheus exporter
    pub enabled: bool,

    /// Metrics export port
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Season projections JSON
    pub path: Option<PathBuf>,
}

/// A league registered when the service starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSeed {
    pub league_id: LeagueId,
    pub teams: Vec<TeamSeed>,

    /// Falls back to `roster.default_capacity`
    #[serde(default)]
    pub roster_capacity: Option<usize>,

    /// Initial waiver order; registration order when absent
    #[serde(default)]
    pub waiver_order: Option<Vec<TeamId>>,

    /// Standings best-first; required by the `reverse_standings` waiver rotation
    #[serde(default)]
    pub standings: Option<Vec<TeamId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub team_id: TeamId,
    pub name: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { event_buffer: 1024, shutdown_timeout_secs: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
            file_prefix: "league-service.log".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true, port: 9090 }
    }
}

/// Load configuration from an optional TOML file layered with `LEAGUE_` environment variables
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = path {
        tracing::debug!("Loading configuration from file: {:?}", path);
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true),
    );

    let config: ServiceConfig = builder
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    // Validate metrics port
    if config.metrics.enabled && config.metrics.port == 0 {
        return Err(anyhow::anyhow!("Invalid metrics port: {}", config.metrics.port));
    }

    config
        .draft
        .defaults
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid draft defaults: {}", e))?;
    config.waiver.validate().map_err(|e| anyhow::anyhow!("Invalid waiver settings: {}", e))?;

    let mut league_ids = HashSet::new();
    for league in &config.leagues {
        if !league_ids.insert(league.league_id) {
            return Err(anyhow::anyhow!("Duplicate league id: {}", league.league_id));
        }

        let team_ids: HashSet<TeamId> = league.teams.iter().map(|t| t.team_id).collect();
        if team_ids.len() != league.teams.len() {
            return Err(anyhow::anyhow!("League {} has duplicate team ids", league.league_id));
        }
        if league.roster_capacity == Some(0) {
            return Err(anyhow::anyhow!("League {} roster capacity must be positive", league.league_id));
        }
        if let Some(order) = &league.waiver_order {
            if !lists_each_team_once(order, &team_ids) {
                return Err(anyhow::anyhow!(
                    "League {} waiver order must list every team once",
                    league.league_id
                ));
            }
        }
        match &league.standings {
            Some(standings) if !lists_each_team_once(standings, &team_ids) => {
                return Err(anyhow::anyhow!(
                    "League {} standings must list every team once",
                    league.league_id
                ));
            }
            None if config.waiver.policy == PriorityPolicyKind::ReverseStandings => {
                return Err(anyhow::anyhow!(
                    "League {} needs standings for the reverse_standings waiver policy",
                    league.league_id
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

fn lists_each_team_once(order: &[TeamId], teams: &HashSet<TeamId>) -> bool {
    let listed: HashSet<TeamId> = order.iter().copied().collect();
    listed == *teams && order.len() == teams.len()
}

/// Save configuration to a TOML file
pub fn save_config(config: &ServiceConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write configuration to {:?}", path))?;
    Ok(())
}
