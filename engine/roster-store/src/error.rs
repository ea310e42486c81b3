//! Error types for the roster store

use player_registry::{CatalogError, PlayerId};
use thiserror::Error;

use crate::types::{LeagueId, TeamId};

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("League not found: {0}")]
    LeagueNotFound(LeagueId),

    #[error("Team {team_id} not found in league {league_id}")]
    TeamNotFound { league_id: LeagueId, team_id: TeamId },

    #[error("Team {team_id} already registered in league {league_id}")]
    DuplicateTeam { league_id: LeagueId, team_id: TeamId },

    #[error("Player {player_id} is already rostered by team {team_id}")]
    PlayerAlreadyRostered { player_id: PlayerId, team_id: TeamId },

    #[error("Player {player_id} is not on team {team_id}'s roster")]
    PlayerNotOnRoster { player_id: PlayerId, team_id: TeamId },

    #[error("Roster full for team {team_id}: capacity {capacity}")]
    RosterFull { team_id: TeamId, capacity: usize },

    #[error("Insufficient budget for team {team_id}: required {required}, available {available}")]
    InsufficientBudget { team_id: TeamId, required: u32, available: u32 },

    #[error("Roster store unavailable: {0}")]
    Unavailable(String),

    #[error("Roster store request timed out after {0} ms")]
    Timeout(u64),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl RosterError {
    /// Whether the operation may succeed if retried unchanged
    pub fn is_transient(&self) -> bool {
        match self {
            RosterError::Unavailable(_) | RosterError::Timeout(_) => true,
            RosterError::Catalog(err) => err.is_transient(),
            _ => false,
        }
    }
}
