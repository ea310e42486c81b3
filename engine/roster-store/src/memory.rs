//! In-process roster store

use async_trait::async_trait;
use chrono::Utc;
use player_registry::PlayerId;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::RosterError;
use crate::store::RosterStore;
use crate::transaction::{RosterOp, RosterTransaction};
use crate::types::{
    LeagueId, Roster, RosterEntry, RosterSlot, TeamId, TeamInfo, TeamWaiverState,
};
use crate::Result;

#[derive(Debug, Clone)]
struct TeamRecord {
    info: TeamInfo,
    players: Vec<RosterEntry>,
    waiver: TeamWaiverState,
}

#[derive(Debug, Clone, Default)]
struct LeagueRosters {
    /// Registration order
    order: Vec<TeamId>,
    teams: HashMap<TeamId, TeamRecord>,
    /// Reverse index enforcing single ownership
    owners: HashMap<PlayerId, TeamId>,
}

impl LeagueRosters {
    fn team(&self, league_id: LeagueId, team_id: TeamId) -> Result<&TeamRecord> {
        self.teams.get(&team_id).ok_or(RosterError::TeamNotFound { league_id, team_id })
    }

    fn team_mut(&mut self, league_id: LeagueId, team_id: TeamId) -> Result<&mut TeamRecord> {
        self.teams.get_mut(&team_id).ok_or(RosterError::TeamNotFound { league_id, team_id })
    }

    fn apply(&mut self, league_id: LeagueId, op: &RosterOp) -> Result<()> {
        match *op {
            RosterOp::Add { team_id, player_id, slot } => {
                if let Some(&owner) = self.owners.get(&player_id) {
                    return Err(RosterError::PlayerAlreadyRostered { player_id, team_id: owner });
                }
                let team = self.team_mut(league_id, team_id)?;
                if team.players.len() >= team.info.capacity {
                    return Err(RosterError::RosterFull { team_id, capacity: team.info.capacity });
                }
                team.players.push(RosterEntry { player_id, slot, acquired_at: Utc::now() });
                self.owners.insert(player_id, team_id);
            }
            RosterOp::Remove { team_id, player_id } => {
                let team = self.team_mut(league_id, team_id)?;
                let index = team
                    .players
                    .iter()
                    .position(|e| e.player_id == player_id)
                    .ok_or(RosterError::PlayerNotOnRoster { player_id, team_id })?;
                team.players.remove(index);
                self.owners.remove(&player_id);
            }
            RosterOp::DebitBudget { team_id, amount } => {
                let team = self.team_mut(league_id, team_id)?;
                if team.waiver.budget < amount {
                    return Err(RosterError::InsufficientBudget {
                        team_id,
                        required: amount,
                        available: team.waiver.budget,
                    });
                }
                team.waiver.budget -= amount;
            }
            RosterOp::SetWaiverState { team_id, state } => {
                self.team_mut(league_id, team_id)?.waiver = state;
            }
        }
        Ok(())
    }
}

/// Roster store held in memory behind a single lock
///
/// `commit` stages every operation on a copy of the league and swaps it in only when all of
/// them succeed.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    leagues: RwLock<HashMap<LeagueId, LeagueRosters>>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team, creating the league on first use
    ///
    /// New teams queue behind existing ones for waivers and start with no budget until the
    /// waiver engine initialises the league.
    pub async fn register_team(&self, league_id: LeagueId, info: TeamInfo) -> Result<()> {
        let mut leagues = self.leagues.write().await;
        let league = leagues.entry(league_id).or_default();

        if league.teams.contains_key(&info.team_id) {
            return Err(RosterError::DuplicateTeam { league_id, team_id: info.team_id });
        }

        let waiver = TeamWaiverState { priority_rank: league.order.len() as u32 + 1, budget: 0 };
        info!("Registered team {} ({}) in league {}", info.team_id, info.name, league_id);

        league.order.push(info.team_id);
        league
            .teams
            .insert(info.team_id, TeamRecord { info, players: Vec::new(), waiver });
        Ok(())
    }

    /// Register a full league in one call
    pub async fn register_league(&self, league_id: LeagueId, teams: Vec<TeamInfo>) -> Result<()> {
        for team in teams {
            self.register_team(league_id, team).await?;
        }
        Ok(())
    }

    pub async fn league_count(&self) -> usize {
        self.leagues.read().await.len()
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<TeamInfo>> {
        let leagues = self.leagues.read().await;
        let league = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;

        Ok(league
            .order
            .iter()
            .filter_map(|id| league.teams.get(id))
            .map(|t| t.info.clone())
            .collect())
    }

    async fn get_roster(&self, league_id: LeagueId, team_id: TeamId) -> Result<Roster> {
        let leagues = self.leagues.read().await;
        let league = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;
        let team = league.team(league_id, team_id)?;

        Ok(Roster {
            league_id,
            team_id,
            team_name: team.info.name.clone(),
            players: team.players.clone(),
            capacity: team.info.capacity,
        })
    }

    async fn add_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
        slot: RosterSlot,
    ) -> Result<()> {
        self.commit(RosterTransaction::new(league_id).add(team_id, player_id, slot)).await
    }

    async fn remove_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<()> {
        self.commit(RosterTransaction::new(league_id).remove(team_id, player_id)).await
    }

    async fn owner_of(&self, league_id: LeagueId, player_id: PlayerId) -> Result<Option<TeamId>> {
        let leagues = self.leagues.read().await;
        let league = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;
        Ok(league.owners.get(&player_id).copied())
    }

    async fn rostered_players(&self, league_id: LeagueId) -> Result<HashSet<PlayerId>> {
        let leagues = self.leagues.read().await;
        let league = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;
        Ok(league.owners.keys().copied().collect())
    }

    async fn waiver_state(&self, league_id: LeagueId, team_id: TeamId) -> Result<TeamWaiverState> {
        let leagues = self.leagues.read().await;
        let league = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;
        Ok(league.team(league_id, team_id)?.waiver)
    }

    async fn commit(&self, transaction: RosterTransaction) -> Result<()> {
        let league_id = transaction.league_id;
        let mut leagues = self.leagues.write().await;
        let current = leagues.get(&league_id).ok_or(RosterError::LeagueNotFound(league_id))?;

        let mut staged = current.clone();
        for op in &transaction.ops {
            staged.apply(league_id, op)?;
        }

        debug!("Committed {} roster ops in league {}", transaction.ops.len(), league_id);
        leagues.insert(league_id, staged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    async fn create_test_store() -> InMemoryRosterStore {
        let store = InMemoryRosterStore::new();
        store
            .register_league(
                1,
                vec![TeamInfo::new(10, "Sharks", 2), TeamInfo::new(20, "Jets", 2)],
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_add_and_remove_player() {
        let store = create_test_store().await;

        store.add_player(1, 10, 100, RosterSlot::Bench).await.unwrap();
        assert_eq!(store.owner_of(1, 100).await.unwrap(), Some(10));

        store.remove_player(1, 10, 100).await.unwrap();
        assert_eq!(store.owner_of(1, 100).await.unwrap(), None);
        assert!(store.get_roster(1, 10).await.unwrap().players.is_empty());
    }

    #[tokio::test]
    async fn test_player_owned_once_per_league() {
        let store = create_test_store().await;
        store.add_player(1, 10, 100, RosterSlot::Bench).await.unwrap();

        let err = store.add_player(1, 20, 100, RosterSlot::Bench).await.unwrap_err();
        assert!(matches!(err, RosterError::PlayerAlreadyRostered { player_id: 100, team_id: 10 }));
    }

    #[tokio::test]
    async fn test_same_player_in_different_leagues() {
        let store = create_test_store().await;
        store.register_team(2, TeamInfo::new(10, "Sharks", 2)).await.unwrap();

        store.add_player(1, 10, 100, RosterSlot::Bench).await.unwrap();
        store.add_player(2, 10, 100, RosterSlot::Bench).await.unwrap();
        assert_eq!(store.league_count().await, 2);
    }

    #[tokio::test]
    async fn test_roster_full() {
        let store = create_test_store().await;
        store.add_player(1, 10, 100, RosterSlot::Bench).await.unwrap();
        store.add_player(1, 10, 101, RosterSlot::Bench).await.unwrap();

        let err = store.add_player(1, 10, 102, RosterSlot::Bench).await.unwrap_err();
        assert!(matches!(err, RosterError::RosterFull { team_id: 10, capacity: 2 }));
    }

    #[tokio::test]
    async fn test_commit_is_all_or_nothing() {
        let store = create_test_store().await;
        store
            .commit(
                RosterTransaction::new(1)
                    .set_waiver_state(10, TeamWaiverState { priority_rank: 1, budget: 5 }),
            )
            .await
            .unwrap();

        // Budget debit fails after the add has been staged
        let tx = RosterTransaction::new(1).add(10, 100, RosterSlot::Bench).debit_budget(10, 50);
        let err = store.commit(tx).await.unwrap_err();
        assert!(matches!(err, RosterError::InsufficientBudget { required: 50, available: 5, .. }));

        assert_eq!(store.owner_of(1, 100).await.unwrap(), None);
        assert_eq!(store.waiver_state(1, 10).await.unwrap().budget, 5);
    }

    #[tokio::test]
    async fn test_drop_before_add_frees_slot() {
        let store = create_test_store().await;
        store.add_player(1, 10, 100, RosterSlot::Starter).await.unwrap();
        store.add_player(1, 10, 101, RosterSlot::Bench).await.unwrap();

        let tx = RosterTransaction::new(1).remove(10, 100).add(10, 200, RosterSlot::Bench);
        store.commit(tx).await.unwrap();

        let roster = store.get_roster(1, 10).await.unwrap();
        assert_eq!(roster.player_ids(), vec![101, 200]);
    }

    #[tokio::test]
    async fn test_registration_order_and_default_priority() {
        let store = create_test_store().await;
        let teams: Vec<_> = store.list_teams(1).await.unwrap().into_iter().map(|t| t.team_id).collect();
        assert_eq!(teams, vec![10, 20]);
        assert_eq!(store.waiver_state(1, 20).await.unwrap().priority_rank, 2);

        let err = store.register_team(1, TeamInfo::new(10, "Again", 2)).await.unwrap_err();
        assert!(matches!(err, RosterError::DuplicateTeam { .. }));
        assert!(matches!(
            store.list_teams(9).await.unwrap_err(),
            RosterError::LeagueNotFound(9)
        ));
    }

    proptest! {
        #[test]
        fn prop_ownership_stays_unique(ops in prop::collection::vec((0u32..3, 0u32..6, any::<bool>()), 1..40)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let store = InMemoryRosterStore::new();
                store
                    .register_league(
                        1,
                        vec![
                            TeamInfo::new(0, "A", 4),
                            TeamInfo::new(1, "B", 4),
                            TeamInfo::new(2, "C", 4),
                        ],
                    )
                    .await
                    .unwrap();

                for (team, player, add) in ops {
                    let _ = if add {
                        store.add_player(1, team, player, RosterSlot::Bench).await
                    } else {
                        store.remove_player(1, team, player).await
                    };
                }

                let mut seen = HashSet::new();
                for team in 0..3 {
                    for player in store.get_roster(1, team).await.unwrap().player_ids() {
                        assert!(seen.insert(player), "player {player} rostered twice");
                    }
                }
                assert_eq!(seen, store.rostered_players(1).await.unwrap());
            });
        }
    }
}
