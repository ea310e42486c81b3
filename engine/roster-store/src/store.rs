//! Roster store capability

use async_trait::async_trait;
use player_registry::PlayerId;
use std::collections::HashSet;

use crate::transaction::RosterTransaction;
use crate::types::{LeagueId, Roster, RosterSlot, TeamId, TeamInfo, TeamWaiverState};
use crate::Result;

/// Sole writer of player ownership within a league
///
/// Implementations must guarantee that a player id is owned by at most one team per league,
/// and that [`RosterStore::commit`] leaves the league untouched when any operation fails.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Teams registered in a league, in registration order
    async fn list_teams(&self, league_id: LeagueId) -> Result<Vec<TeamInfo>>;

    async fn get_roster(&self, league_id: LeagueId, team_id: TeamId) -> Result<Roster>;

    async fn add_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
        slot: RosterSlot,
    ) -> Result<()>;

    async fn remove_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<()>;

    /// Team currently owning a player, if any
    async fn owner_of(&self, league_id: LeagueId, player_id: PlayerId) -> Result<Option<TeamId>>;

    /// Every player rostered anywhere in the league
    async fn rostered_players(&self, league_id: LeagueId) -> Result<HashSet<PlayerId>>;

    async fn waiver_state(&self, league_id: LeagueId, team_id: TeamId) -> Result<TeamWaiverState>;

    /// Apply every operation or none
    async fn commit(&self, transaction: RosterTransaction) -> Result<()>;
}
