//! Offline mock drafts
//!
//! A mock draft runs every pick as an auto-pick against an in-memory player pool. Nothing is
//! written to a roster store and no timers are involved.

use chrono::{DateTime, Utc};
use player_registry::{PlayerRecord, RankingStrategy};
use roster_store::{TeamId, TeamInfo};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

use crate::auto_pick::{position_counts, select_auto_pick, PositionCaps};
use crate::config::DraftConfig;
use crate::error::DraftError;
use crate::order::{generate_turn_order, DraftOrder};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockPick {
    pub pick_number: u32,
    pub round: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub player: PlayerRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockDraft {
    pub base_order: Vec<TeamId>,
    pub picks: Vec<MockPick>,
    pub rosters: BTreeMap<TeamId, Vec<PlayerRecord>>,
    pub completed_at: DateTime<Utc>,
}

impl MockDraft {
    pub fn picks_for_team(&self, team_id: TeamId) -> impl Iterator<Item = &MockPick> {
        self.picks.iter().filter(move |p| p.team_id == team_id)
    }
}

/// Simulate a full draft where every team auto-picks
///
/// Stops early if the pool runs dry.
pub fn simulate_draft(
    teams: &[TeamInfo],
    config: &DraftConfig,
    order: &DraftOrder,
    mut players: Vec<PlayerRecord>,
    ranking: &dyn RankingStrategy,
    caps: &PositionCaps,
) -> Result<MockDraft, DraftError> {
    config.validate().map_err(DraftError::InvalidConfig)?;
    if teams.len() < 2 {
        return Err(DraftError::NotEnoughTeams { found: teams.len() });
    }

    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.team_id).collect();
    let names: HashMap<TeamId, &str> = teams.iter().map(|t| (t.team_id, t.name.as_str())).collect();
    let base_order = order.base_order(&team_ids)?;
    let turn_order = generate_turn_order(&base_order, config.rounds, config.draft_type);

    ranking.sort_best_first(&mut players);

    let mut rosters: BTreeMap<TeamId, Vec<PlayerRecord>> =
        team_ids.iter().map(|id| (*id, Vec::new())).collect();
    let mut picks = Vec::with_capacity(turn_order.len());

    for (index, team_id) in turn_order.iter().enumerate() {
        let pick_number = index as u32 + 1;
        let roster = rosters.entry(*team_id).or_default();
        let counts = position_counts(roster.iter());

        let Some(choice) = select_auto_pick(&[], &players, &counts, caps).map(|p| p.player_id)
        else {
            warn!("Mock draft ran out of players at pick {}", pick_number);
            break;
        };
        let Some(slot) = players.iter().position(|p| p.player_id == choice) else {
            break;
        };
        let player = players.remove(slot);

        roster.push(player.clone());
        picks.push(MockPick {
            pick_number,
            round: index as u32 / team_ids.len() as u32 + 1,
            team_id: *team_id,
            team_name: names.get(team_id).map(|n| n.to_string()).unwrap_or_default(),
            player,
        });
    }

    info!("Mock draft completed: {} teams, {} picks", team_ids.len(), picks.len());

    Ok(MockDraft { base_order, picks, rosters, completed_at: Utc::now() })
}
