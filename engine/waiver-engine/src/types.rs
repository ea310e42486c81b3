//! Core types for the waiver engine

use chrono::{DateTime, Utc};
use player_registry::{PlayerId, PlayerRecord};
use roster_store::{LeagueId, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique claim identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimId(pub Uuid);

impl ClaimId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Successful,
    Failed,
    Cancelled,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Successful => "successful",
            ClaimStatus::Failed => "failed",
            ClaimStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Why a claim ended `failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Another claim on the same player won
    OutbidOrLowerPriority,
    /// The player was rostered before this claim could execute
    PlayerNoLongerAvailable,
    /// The paired drop left the roster before this claim could execute
    DropNoLongerOnRoster,
    RosterFull,
    InsufficientBudget,
    /// The store kept failing; the roster is unchanged
    ExecutionFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::OutbidOrLowerPriority => "outbid or lower priority",
            FailureReason::PlayerNoLongerAvailable => "player no longer available",
            FailureReason::DropNoLongerOnRoster => "drop player no longer on roster",
            FailureReason::RosterFull => "roster full",
            FailureReason::InsufficientBudget => "insufficient budget",
            FailureReason::ExecutionFailed => "execution failed",
        };
        f.write_str(s)
    }
}

/// A team's bid to acquire an unrostered player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverClaim {
    pub claim_id: ClaimId,
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub drop_player_id: Option<PlayerId>,
    pub bid_amount: u32,
    pub submitted_at: DateTime<Utc>,

    /// Team's priority rank when the claim was submitted
    pub priority: u32,

    pub status: ClaimStatus,
    pub processed_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<FailureReason>,
}

impl WaiverClaim {
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    /// Resolution order among claims on one player: lower priority rank, then higher bid,
    /// then earlier submission. The claim id makes the order total.
    pub fn resolution_key(&self) -> (u32, std::cmp::Reverse<u32>, DateTime<Utc>, ClaimId) {
        (self.priority, std::cmp::Reverse(self.bid_amount), self.submitted_at, self.claim_id)
    }
}

/// Submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub drop_player_id: Option<PlayerId>,
    pub bid_amount: u32,
}

impl ClaimRequest {
    pub fn new(team_id: TeamId, player_id: PlayerId, bid_amount: u32) -> Self {
        Self { team_id, player_id, drop_player_id: None, bid_amount }
    }

    pub fn with_drop(mut self, drop_player_id: PlayerId) -> Self {
        self.drop_player_id = Some(drop_player_id);
        self
    }
}

/// Amendment to a pending claim; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimUpdate {
    pub bid_amount: Option<u32>,

    /// `Some(None)` clears the drop player
    pub drop_player_id: Option<Option<PlayerId>>,
}

/// Budget and priority summary for one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWaiverInfo {
    pub league_id: LeagueId,
    pub team_id: TeamId,
    pub priority_rank: u32,
    pub budget: u32,
    pub pending_claims: usize,
    pub total_pending_bids: u32,
    pub available_budget: u32,
}

/// Unrostered player with claim activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverWirePlayer {
    pub player: PlayerRecord,
    pub pending_claims: usize,
    pub highest_bid: Option<u32>,
}

/// Candidate order for one contested player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerQueue {
    pub player_id: PlayerId,

    /// Best candidate first
    pub candidates: Vec<ClaimId>,
}

/// Final state of one claim after a resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub claim_id: ClaimId,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub bid_amount: u32,
    pub status: ClaimStatus,
    pub failure_reason: Option<FailureReason>,
}

/// Result of one resolution pass over a league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub league_id: LeagueId,
    pub processed: u32,
    pub successful: u32,
    pub failed: u32,
    pub outcomes: Vec<ClaimOutcome>,

    /// Waiver order after rotation, first pick first; empty when nothing was processed
    pub priority_order: Vec<TeamId>,

    /// False when rotation could not be written back to the store
    pub priority_updated: bool,
    pub resolved_at: DateTime<Utc>,
}

impl ResolutionSummary {
    pub fn empty(league_id: LeagueId) -> Self {
        Self {
            league_id,
            processed: 0,
            successful: 0,
            failed: 0,
            outcomes: Vec::new(),
            priority_order: Vec::new(),
            priority_updated: false,
            resolved_at: Utc::now(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.processed == 0
    }

    pub fn winners(&self) -> impl Iterator<Item = &ClaimOutcome> {
        self.outcomes.iter().filter(|o| o.status == ClaimStatus::Successful)
    }
}
