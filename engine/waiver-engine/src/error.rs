//! Error types for the waiver engine

use player_registry::{CatalogError, PlayerId};
use roster_store::{RosterError, TeamId};
use thiserror::Error;

use crate::types::{ClaimId, ClaimStatus};

/// Why a claim submission, update or cancellation was refused; nothing is mutated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimRejection {
    #[error("Team {0} not found in this league")]
    TeamNotFound(TeamId),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Player {0} is already on a roster in this league")]
    PlayerAlreadyRostered(PlayerId),

    #[error("Team already has a pending claim on player {0}")]
    DuplicateClaim(PlayerId),

    #[error("Drop player {0} is not on the team's roster")]
    DropNotOnRoster(PlayerId),

    #[error("Roster full: capacity {capacity}")]
    RosterFull { capacity: usize },

    #[error("Insufficient budget: bid {bid}, available {available}")]
    InsufficientBudget { bid: u32, available: u32 },

    #[error("Claim belongs to team {owner}")]
    NotClaimOwner { owner: TeamId },

    #[error("Claim is {0}, only pending claims can change")]
    ClaimNotPending(ClaimStatus),

    #[error("Waiver resolution is in progress")]
    ResolutionInProgress,
}

#[derive(Error, Debug)]
pub enum WaiverError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Claim rejected: {0}")]
    ClaimRejected(#[from] ClaimRejection),

    #[error("Invalid waiver configuration: {0}")]
    InvalidConfig(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
}

impl WaiverError {
    /// Whether the operation may succeed if retried unchanged
    pub fn is_transient(&self) -> bool {
        match self {
            WaiverError::Timeout(_) => true,
            WaiverError::Catalog(err) => err.is_transient(),
            WaiverError::Roster(err) => err.is_transient(),
            _ => false,
        }
    }

    pub fn rejection(&self) -> Option<&ClaimRejection> {
        match self {
            WaiverError::ClaimRejected(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(WaiverError::Timeout(2000).is_transient());
        assert!(WaiverError::Roster(RosterError::Unavailable("down".into())).is_transient());
        assert!(!WaiverError::ClaimRejected(ClaimRejection::DuplicateClaim(7)).is_transient());
        assert!(!WaiverError::Roster(RosterError::LeagueNotFound(1)).is_transient());
    }

    #[test]
    fn test_rejection_message() {
        let err = WaiverError::from(ClaimRejection::InsufficientBudget { bid: 40, available: 25 });
        assert_eq!(err.to_string(), "Claim rejected: Insufficient budget: bid 40, available 25");
        assert!(err.rejection().is_some());
    }
}
