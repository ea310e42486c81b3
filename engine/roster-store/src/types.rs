use chrono::{DateTime, Utc};
use player_registry::PlayerId;
use serde::{Deserialize, Serialize};

/// Team identifier, unique within a league
pub type TeamId = u32;

/// League identifier
pub type LeagueId = u32;

/// Where a player sits on a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterSlot {
    Starter,
    Bench,
}

/// One rostered player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub slot: RosterSlot,
    pub acquired_at: DateTime<Utc>,
}

/// Team registration data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_id: TeamId,
    pub name: String,
    /// Maximum number of rostered players
    pub capacity: usize,
}

impl TeamInfo {
    pub fn new(team_id: TeamId, name: impl Into<String>, capacity: usize) -> Self {
        Self { team_id, name: name.into(), capacity }
    }
}

/// Snapshot of a team's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub team_name: String,
    pub players: Vec<RosterEntry>,
    pub capacity: usize,
}

impl Roster {
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|e| e.player_id == player_id)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    pub fn open_slots(&self) -> usize {
        self.capacity.saturating_sub(self.players.len())
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|e| e.player_id).collect()
    }
}

/// A team's waiver standing
///
/// Written only by the waiver engine's resolution and league initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWaiverState {
    /// Position in the waiver queue; lower claims earlier
    pub priority_rank: u32,
    /// Remaining free-agent budget
    pub budget: u32,
}
