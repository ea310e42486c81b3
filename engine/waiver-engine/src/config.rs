//! Configuration for the waiver engine

use chrono::{NaiveTime, Weekday};
use roster_store::RetryConfig;
use serde::{Deserialize, Serialize};

/// Which rotation runs after each resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPolicyKind {
    Rolling,
    ReverseStandings,
}

/// Weekly resolution cutoff, in UTC
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiverScheduleConfig {
    pub enabled: bool,

    /// Day of week, e.g. "wed" or "Wednesday"
    pub weekday: String,

    /// Cutoff time in HH:MM format
    pub time: String,
}

impl Default for WaiverScheduleConfig {
    fn default() -> Self {
        Self { enabled: true, weekday: "Wed".to_string(), time: "02:00".to_string() }
    }
}

impl WaiverScheduleConfig {
    pub fn parsed_weekday(&self) -> Result<Weekday, String> {
        self.weekday.parse::<Weekday>().map_err(|_| format!("invalid weekday: {}", self.weekday))
    }

    pub fn parsed_time(&self) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .map_err(|_| format!("invalid cutoff time (expected HH:MM): {}", self.time))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.parsed_weekday()?;
        self.parsed_time()?;
        Ok(())
    }
}

/// WaiverEngine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiverEngineConfig {
    /// Budget each team receives when a league is initialised
    pub budget_per_team: u32,

    pub policy: PriorityPolicyKind,

    /// Bound on each catalog or store call
    pub io_timeout_ms: u64,

    /// Backoff for transient failures while executing a claim
    pub retry: RetryConfig,

    pub schedule: WaiverScheduleConfig,
}

impl Default for WaiverEngineConfig {
    fn default() -> Self {
        Self {
            budget_per_team: 100,
            policy: PriorityPolicyKind::Rolling,
            io_timeout_ms: 2_000,
            retry: RetryConfig::default(),
            schedule: WaiverScheduleConfig::default(),
        }
    }
}

impl WaiverEngineConfig {
    /// Defaults overridden by `WAIVER_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse::<u32>("WAIVER_BUDGET_PER_TEAM") {
            config.budget_per_team = v;
        }
        if let Ok(v) = std::env::var("WAIVER_CUTOFF_WEEKDAY") {
            config.schedule.weekday = v;
        }
        if let Ok(v) = std::env::var("WAIVER_CUTOFF_TIME") {
            config.schedule.time = v;
        }
        if let Some(v) = env_parse::<bool>("WAIVER_SCHEDULE_ENABLED") {
            config.schedule.enabled = v;
        }
        if let Some(v) = env_parse::<u64>("WAIVER_IO_TIMEOUT_MS") {
            config.io_timeout_ms = v;
        }

        config
    }

    pub fn validate(&self) -> Result<(), String> {
        self.schedule.validate()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_wednesday_two_am() {
        let config = WaiverEngineConfig::default();
        assert_eq!(config.budget_per_team, 100);
        assert_eq!(config.schedule.parsed_weekday().unwrap(), Weekday::Wed);
        let cutoff = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(config.schedule.parsed_time().unwrap(), cutoff);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var("WAIVER_BUDGET_PER_TEAM", "250");
        std::env::set_var("WAIVER_CUTOFF_WEEKDAY", "Tue");
        let config = WaiverEngineConfig::from_env();
        std::env::remove_var("WAIVER_BUDGET_PER_TEAM");
        std::env::remove_var("WAIVER_CUTOFF_WEEKDAY");

        assert_eq!(config.budget_per_team, 250);
        assert_eq!(config.schedule.parsed_weekday().unwrap(), Weekday::Tue);
        assert_eq!(config.policy, PriorityPolicyKind::Rolling);
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let schedule = WaiverScheduleConfig {
            enabled: true,
            weekday: "someday".to_string(),
            time: "02:00".to_string(),
        };
        assert!(schedule.validate().is_err());

        let schedule = WaiverScheduleConfig {
            enabled: true,
            weekday: "Thursday".to_string(),
            time: "25:61".to_string(),
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_policy_kind_serde() {
        let kind: PriorityPolicyKind = serde_json::from_str("\"reverse_standings\"").unwrap();
        assert_eq!(kind, PriorityPolicyKind::ReverseStandings);
    }
}
