//! Multi-operation roster mutations applied as one unit

use player_registry::PlayerId;
use serde::{Deserialize, Serialize};

use crate::types::{LeagueId, RosterSlot, TeamId, TeamWaiverState};

/// A single roster mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RosterOp {
    Add { team_id: TeamId, player_id: PlayerId, slot: RosterSlot },
    Remove { team_id: TeamId, player_id: PlayerId },
    DebitBudget { team_id: TeamId, amount: u32 },
    SetWaiverState { team_id: TeamId, state: TeamWaiverState },
}

/// Ordered list of operations committed all-or-nothing
///
/// Operations apply in insertion order against the league state produced by the previous
/// operation, so a `Remove` queued before an `Add` frees the slot the add needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterTransaction {
    pub league_id: LeagueId,
    pub ops: Vec<RosterOp>,
}

impl RosterTransaction {
    pub fn new(league_id: LeagueId) -> Self {
        Self { league_id, ops: Vec::new() }
    }

    pub fn add(mut self, team_id: TeamId, player_id: PlayerId, slot: RosterSlot) -> Self {
        self.ops.push(RosterOp::Add { team_id, player_id, slot });
        self
    }

    pub fn remove(mut self, team_id: TeamId, player_id: PlayerId) -> Self {
        self.ops.push(RosterOp::Remove { team_id, player_id });
        self
    }

    pub fn debit_budget(mut self, team_id: TeamId, amount: u32) -> Self {
        self.ops.push(RosterOp::DebitBudget { team_id, amount });
        self
    }

    pub fn set_waiver_state(mut self, team_id: TeamId, state: TeamWaiverState) -> Self {
        self.ops.push(RosterOp::SetWaiverState { team_id, state });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
