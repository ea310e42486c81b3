//! Draft records

use chrono::{DateTime, Utc};
use player_registry::PlayerId;
use roster_store::{LeagueId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::config::DraftConfig;

/// Draft identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(pub Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    /// Base order reverses every even round
    Snake,
    /// Base order repeats every round
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftOrderType {
    Random,
    Custom,
    ReverseStandings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Scheduled,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftStatus::Scheduled => "scheduled",
            DraftStatus::Active => "active",
            DraftStatus::Paused => "paused",
            DraftStatus::Completed => "completed",
            DraftStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A recorded selection; never modified once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub pick_number: u32,
    pub round: u32,
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub timestamp: DateTime<Utc>,
    /// Seconds between the pick opening and being made
    pub elapsed_secs: i64,
    pub is_auto_pick: bool,
}

/// Full draft state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: DraftId,
    pub league_id: LeagueId,
    pub config: DraftConfig,
    pub draft_order_type: DraftOrderType,

    /// Round-one order
    pub base_order: Vec<TeamId>,

    /// Team for every pick number, index 0 is pick 1
    pub turn_order: Vec<TeamId>,

    pub team_names: HashMap<TeamId, String>,
    pub status: DraftStatus,

    /// 1-based; exceeds `total_picks()` once completed
    pub current_pick: u32,

    pub deadline: Option<DateTime<Utc>>,
    pub pick_started_at: Option<DateTime<Utc>>,

    /// Bumped whenever the pick timer is armed or cancelled; expiries from an older
    /// generation are ignored
    pub timer_generation: u64,

    pub picks: Vec<Pick>,
    pub auto_pick_queues: HashMap<TeamId, Vec<PlayerId>>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn total_picks(&self) -> u32 {
        self.turn_order.len() as u32
    }

    pub fn team_count(&self) -> usize {
        self.base_order.len()
    }

    /// Team on the clock, `None` once every pick is made
    pub fn current_team(&self) -> Option<TeamId> {
        self.team_for_pick(self.current_pick)
    }

    pub fn team_for_pick(&self, pick_number: u32) -> Option<TeamId> {
        pick_number.checked_sub(1).and_then(|i| self.turn_order.get(i as usize)).copied()
    }

    pub fn round_for_pick(&self, pick_number: u32) -> u32 {
        let teams = self.team_count().max(1) as u32;
        pick_number.saturating_sub(1) / teams + 1
    }

    pub fn is_drafted(&self, player_id: PlayerId) -> bool {
        self.picks.iter().any(|p| p.player_id == player_id)
    }

    pub fn team_name(&self, team_id: TeamId) -> String {
        self.team_names.get(&team_id).cloned().unwrap_or_else(|| format!("Team {team_id}"))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, DraftStatus::Completed | DraftStatus::Cancelled)
    }
}

/// Read-only view returned by `draft_status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftStatusView {
    pub draft_id: DraftId,
    pub league_id: LeagueId,
    pub status: DraftStatus,
    pub draft_type: DraftType,
    pub draft_order_type: DraftOrderType,
    pub current_pick: u32,
    pub current_round: u32,
    pub current_team_id: Option<TeamId>,
    pub total_picks: u32,
    pub total_rounds: u32,
    pub picks_made: u32,
    pub deadline: Option<DateTime<Utc>>,
    pub pick_duration_secs: u64,
    pub auto_pick_enabled: bool,
    pub base_order: Vec<TeamId>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Most recent picks, oldest first
    pub recent_picks: Vec<Pick>,
}

impl From<&Draft> for DraftStatusView {
    fn from(draft: &Draft) -> Self {
        let recent_start = draft.picks.len().saturating_sub(5);
        Self {
            draft_id: draft.draft_id,
            league_id: draft.league_id,
            status: draft.status,
            draft_type: draft.config.draft_type,
            draft_order_type: draft.draft_order_type,
            current_pick: draft.current_pick,
            current_round: draft.round_for_pick(draft.current_pick),
            current_team_id: draft.current_team(),
            total_picks: draft.total_picks(),
            total_rounds: draft.config.rounds,
            picks_made: draft.picks.len() as u32,
            deadline: draft.deadline,
            pick_duration_secs: draft.config.pick_duration_secs,
            auto_pick_enabled: draft.config.auto_pick_enabled,
            base_order: draft.base_order.clone(),
            scheduled_start: draft.config.scheduled_start,
            started_at: draft.started_at,
            completed_at: draft.completed_at,
            recent_picks: draft.picks[recent_start..].to_vec(),
        }
    }
}
