//! Error types for the draft engine

use player_registry::{CatalogError, PlayerId};
use roster_store::{RosterError, TeamId};
use thiserror::Error;

use crate::types::{DraftId, DraftStatus};

/// Why a pick was refused; nothing is mutated when one is returned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickRejection {
    #[error("Draft is not active (status: {0})")]
    DraftNotActive(DraftStatus),

    #[error("Not your turn: team {expected} is on the clock")]
    NotYourTurn { expected: TeamId, actual: TeamId },

    #[error("Player {0} has already been drafted")]
    PlayerAlreadyDrafted(PlayerId),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Player {0} is already on a roster in this league")]
    PlayerUnavailable(PlayerId),

    #[error("Roster full for team {0}")]
    RosterFull(TeamId),
}

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Draft not found: {0}")]
    DraftNotFound(DraftId),

    #[error("A draft needs at least 2 teams, found {found}")]
    NotEnoughTeams { found: usize },

    #[error("Invalid draft configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot {action} a draft that is {status}")]
    InvalidTransition { status: DraftStatus, action: &'static str },

    #[error("Team {0} is not part of this draft")]
    TeamNotInDraft(TeamId),

    #[error("Pick rejected: {0}")]
    PickRejected(#[from] PickRejection),

    #[error("No player available for auto-pick")]
    NoPlayerAvailable,

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
}

impl DraftError {
    /// Whether the operation may succeed if retried unchanged
    pub fn is_transient(&self) -> bool {
        match self {
            DraftError::Timeout(_) => true,
            DraftError::Catalog(err) => err.is_transient(),
            DraftError::Roster(err) => err.is_transient(),
            _ => false,
        }
    }

    pub fn rejection(&self) -> Option<&PickRejection> {
        match self {
            DraftError::PickRejected(reason) => Some(reason),
            _ => None,
        }
    }
}
