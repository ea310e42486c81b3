use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player identifier, unique across the catalog
pub type PlayerId = u32;

/// Season statistics used by form-based ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_points: f64,
    pub points_per_game: f64,
    pub form: f64,
    /// Share of managers league-wide holding the player, in percent
    pub selected_by_percent: f64,
}

/// A player as the engines see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,

    /// Player name (e.g., "Lamar Jackson")
    pub name: String,

    /// Position (e.g., "QB", "RB", "WR", "TE", "K", "DEF")
    pub position: String,

    /// Pro team abbreviation (e.g., "BAL")
    pub team: String,

    /// Season projected fantasy points, the default ranking score
    pub projected_points: f64,

    pub stats: Option<PlayerStats>,
}

impl PlayerRecord {
    /// Create a new player record without season stats
    pub fn new(
        player_id: PlayerId,
        name: impl Into<String>,
        position: impl Into<String>,
        team: impl Into<String>,
        projected_points: f64,
    ) -> Self {
        Self {
            player_id,
            name: name.into(),
            position: position.into(),
            team: team.into(),
            projected_points,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Display label, e.g. "Lamar Jackson (QB, BAL)"
    pub fn label(&self) -> String {
        format!("{} ({}, {})", self.name, self.position, self.team)
    }
}

/// One player entry in a projections file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable id; assigned by consistent hashing when absent
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    pub name: String,
    pub position: String,
    pub team: String,
    pub projected_points: f64,
    #[serde(default)]
    pub stats: Option<PlayerStats>,
}

/// Container for a season's player projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Season year
    pub season: String,
    /// When this data was last updated
    pub last_updated: DateTime<Utc>,
    pub players: Vec<CatalogEntry>,
}

/// Errors that can occur reading the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog request timed out after {0} ms")]
    Timeout(u64),

    #[error("Could not assign a player id for {0}")]
    IdExhausted(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether a retry could succeed without operator action
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_) | CatalogError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_without_id_deserializes() {
        let json = r#"{"name":"Josh Allen","position":"QB","team":"BUF","projected_points":341.48}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.player_id, None);
        assert!(entry.stats.is_none());
    }

    #[test]
    fn test_transient_classification() {
        assert!(CatalogError::Timeout(2000).is_transient());
        assert!(CatalogError::Unavailable("down".into()).is_transient());
        assert!(!CatalogError::PlayerNotFound(7).is_transient());
    }
}
