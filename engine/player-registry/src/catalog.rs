//! Read-side catalog capability consumed by the draft and waiver engines

use async_trait::async_trait;

use crate::types::{PlayerId, PlayerRecord};
use crate::Result;

/// Narrow read interface over player reference data
///
/// Engines depend on this capability rather than on how players are stored, so a remote
/// catalog can return `CatalogError::Unavailable` and engines treat it as transient.
#[async_trait]
pub trait PlayerCatalog: Send + Sync {
    /// Look up one player; `Ok(None)` when the id is unknown
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>>;

    /// All players, optionally restricted to one position
    async fn list_players(&self, position: Option<&str>) -> Result<Vec<PlayerRecord>>;
}
