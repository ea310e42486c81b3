//! Auto-pick selection

use player_registry::{PlayerId, PlayerRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Soft per-position roster limits applied during auto-pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionCaps {
    /// Keyed by position
    pub caps: HashMap<String, u32>,

    /// Limit for positions not listed in `caps`
    pub unlisted: u32,
}

impl Default for PositionCaps {
    fn default() -> Self {
        let caps = [("QB", 2), ("RB", 5), ("WR", 5), ("TE", 2), ("K", 1), ("DEF", 1)]
            .into_iter()
            .map(|(pos, cap)| (pos.to_string(), cap))
            .collect();
        Self { caps, unlisted: 1 }
    }
}

impl PositionCaps {
    /// Keys match case-insensitively; layered config sources may lower-case them
    pub fn cap_for(&self, position: &str) -> u32 {
        self.caps
            .iter()
            .find(|(pos, _)| pos.eq_ignore_ascii_case(position))
            .map_or(self.unlisted, |(_, cap)| *cap)
    }
}

/// Count rostered players per upper-case position
pub fn position_counts<'a>(players: impl IntoIterator<Item = &'a PlayerRecord>) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for player in players {
        *counts.entry(player.position.to_ascii_uppercase()).or_insert(0) += 1;
    }
    counts
}

/// Choose a player for a team that missed its deadline
///
/// `available` must be sorted best-first. The team's queue wins if any queued player is still
/// available; otherwise the best player whose position is under its cap. If every position is
/// capped the filter is dropped and the best player overall is taken.
pub fn select_auto_pick<'a>(
    queue: &[PlayerId],
    available: &'a [PlayerRecord],
    roster_counts: &HashMap<String, u32>,
    caps: &PositionCaps,
) -> Option<&'a PlayerRecord> {
    let queued = queue
        .iter()
        .find_map(|id| available.iter().find(|p| p.player_id == *id));
    if queued.is_some() {
        return queued;
    }

    available
        .iter()
        .find(|p| {
            let held = roster_counts.get(&p.position.to_ascii_uppercase()).copied().unwrap_or(0);
            held < caps.cap_for(&p.position)
        })
        .or_else(|| available.first())
}
