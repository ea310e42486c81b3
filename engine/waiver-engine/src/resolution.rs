//! Winner ordering for a resolution pass

use player_registry::PlayerId;
use std::collections::HashMap;

use crate::types::{PlayerQueue, WaiverClaim};

/// Group pending claims by target player and order everything for execution
///
/// Candidates for a player are sorted best-first by [`WaiverClaim::resolution_key`]. Players
/// are processed in the order of their best candidate, so when two players' winners compete for
/// the same drop or budget the earlier-priority claim executes first.
pub fn plan_resolution<'a>(claims: impl IntoIterator<Item = &'a WaiverClaim>) -> Vec<PlayerQueue> {
    let mut by_player: HashMap<PlayerId, Vec<&WaiverClaim>> = HashMap::new();
    for claim in claims.into_iter().filter(|c| c.is_pending()) {
        by_player.entry(claim.player_id).or_default().push(claim);
    }

    let mut groups: Vec<Vec<&WaiverClaim>> = by_player
        .into_values()
        .map(|mut candidates| {
            candidates.sort_by_key(|c| c.resolution_key());
            candidates
        })
        .collect();
    groups.sort_by_key(|candidates| candidates[0].resolution_key());

    groups
        .into_iter()
        .map(|candidates| PlayerQueue {
            player_id: candidates[0].player_id,
            candidates: candidates.iter().map(|c| c.claim_id).collect(),
        })
        .collect()
}
