//! Event types emitted by the draft and waiver engines

use chrono::{DateTime, Utc};
use player_registry::PlayerId;
use roster_store::{LeagueId, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical outbound events
///
/// Serialized as JSON objects tagged with `"type"`, e.g. `{"type":"pick_made", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeagueEvent {
    DraftStarted {
        league_id: LeagueId,
        draft_id: Uuid,
        total_picks: u32,
        first_team_id: TeamId,
        first_team_name: String,
        timestamp: DateTime<Utc>,
    },
    PickMade(PickEvent),
    AutoPickMade(PickEvent),
    PickTimerStarted {
        league_id: LeagueId,
        draft_id: Uuid,
        pick_number: u32,
        team_id: TeamId,
        team_name: String,
        deadline: DateTime<Utc>,
    },
    DraftPaused {
        league_id: LeagueId,
        draft_id: Uuid,
        pick_number: u32,
        timestamp: DateTime<Utc>,
    },
    DraftResumed {
        league_id: LeagueId,
        draft_id: Uuid,
        pick_number: u32,
        deadline: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    DraftCompleted {
        league_id: LeagueId,
        draft_id: Uuid,
        total_picks: u32,
        timestamp: DateTime<Utc>,
    },
    DraftCancelled {
        league_id: LeagueId,
        draft_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    WaiverClaimSubmitted {
        league_id: LeagueId,
        claim_id: Uuid,
        team_id: TeamId,
        team_name: String,
        player_id: PlayerId,
        player_name: String,
        drop_player_id: Option<PlayerId>,
        bid_amount: u32,
        priority: u32,
        timestamp: DateTime<Utc>,
    },
    WaiverClaimCancelled {
        league_id: LeagueId,
        claim_id: Uuid,
        team_id: TeamId,
        player_id: PlayerId,
        timestamp: DateTime<Utc>,
    },
    WaiverResultsProcessed {
        league_id: LeagueId,
        processed: u32,
        successful: u32,
        failed: u32,
        awards: Vec<WaiverAward>,
        timestamp: DateTime<Utc>,
    },
    /// Needs operator attention; the league is left waiting
    LeagueAlert {
        league_id: LeagueId,
        draft_id: Option<Uuid>,
        severity: AlertSeverity,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

/// A recorded draft pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickEvent {
    pub league_id: LeagueId,
    pub draft_id: Uuid,
    pub pick_number: u32,
    pub round: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: String,
    pub is_auto_pick: bool,
    pub elapsed_secs: i64,
    pub timestamp: DateTime<Utc>,
}

/// A successful waiver claim in a resolution cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverAward {
    pub claim_id: Uuid,
    pub team_id: TeamId,
    pub team_name: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub drop_player_id: Option<PlayerId>,
    pub bid_amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl LeagueEvent {
    /// Wire name of the event
    pub fn event_type(&self) -> &'static str {
        match self {
            LeagueEvent::DraftStarted { .. } => "draft_started",
            LeagueEvent::PickMade(_) => "pick_made",
            LeagueEvent::AutoPickMade(_) => "auto_pick_made",
            LeagueEvent::PickTimerStarted { .. } => "pick_timer_started",
            LeagueEvent::DraftPaused { .. } => "draft_paused",
            LeagueEvent::DraftResumed { .. } => "draft_resumed",
            LeagueEvent::DraftCompleted { .. } => "draft_completed",
            LeagueEvent::DraftCancelled { .. } => "draft_cancelled",
            LeagueEvent::WaiverClaimSubmitted { .. } => "waiver_claim_submitted",
            LeagueEvent::WaiverClaimCancelled { .. } => "waiver_claim_cancelled",
            LeagueEvent::WaiverResultsProcessed { .. } => "waiver_results_processed",
            LeagueEvent::LeagueAlert { .. } => "league_alert",
        }
    }

    pub fn league_id(&self) -> LeagueId {
        match self {
            LeagueEvent::PickMade(pick) | LeagueEvent::AutoPickMade(pick) => pick.league_id,
            LeagueEvent::DraftStarted { league_id, .. }
            | LeagueEvent::PickTimerStarted { league_id, .. }
            | LeagueEvent::DraftPaused { league_id, .. }
            | LeagueEvent::DraftResumed { league_id, .. }
            | LeagueEvent::DraftCompleted { league_id, .. }
            | LeagueEvent::DraftCancelled { league_id, .. }
            | LeagueEvent::WaiverClaimSubmitted { league_id, .. }
            | LeagueEvent::WaiverClaimCancelled { league_id, .. }
            | LeagueEvent::WaiverResultsProcessed { league_id, .. }
            | LeagueEvent::LeagueAlert { league_id, .. } => *league_id,
        }
    }
}
