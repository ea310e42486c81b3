//! Available-player listing across catalog and store

use player_registry::{PlayerCatalog, PlayerRecord};

use crate::store::RosterStore;
use crate::types::LeagueId;
use crate::Result;

/// Catalog players not rostered by any team in the league
pub async fn list_available(
    catalog: &dyn PlayerCatalog,
    store: &dyn RosterStore,
    league_id: LeagueId,
    position: Option<&str>,
) -> Result<Vec<PlayerRecord>> {
    let rostered = store.rostered_players(league_id).await?;
    let players = catalog.list_players(position).await?;

    Ok(players.into_iter().filter(|p| !rostered.contains(&p.player_id)).collect())
}
