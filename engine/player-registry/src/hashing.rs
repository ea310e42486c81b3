use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types::PlayerId;

/// Consistent hashing for projection entries that arrive without an id
///
/// The same name/position/team always maps to the same player id, so rosters keyed by
/// player id stay valid when the projections file is refreshed.
pub struct ConsistentHasher;

impl ConsistentHasher {
    /// Hash a player's identity to an id in the range [1, max_ids]
    ///
    /// Zero is never produced so it can't be mistaken for an unset id.
    pub fn hash_to_player_id(name: &str, position: &str, team: &str, max_ids: u32) -> PlayerId {
        let composite_key = format!("{name}|{position}|{team}");

        let mut hasher = DefaultHasher::new();
        composite_key.hash(&mut hasher);
        let hash = hasher.finish();

        (hash % max_ids.max(1) as u64) as u32 + 1
    }

    /// Next id in the probing sequence, wrapping within [1, max_ids]
    pub fn probe(id: PlayerId, max_ids: u32) -> PlayerId {
        id % max_ids.max(1) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_hashing() {
        let id1 = ConsistentHasher::hash_to_player_id("Lamar Jackson", "QB", "BAL", 500);
        let id2 = ConsistentHasher::hash_to_player_id("Lamar Jackson", "QB", "BAL", 500);
        assert_eq!(id1, id2);

        let id3 = ConsistentHasher::hash_to_player_id("Josh Allen", "QB", "BUF", 500);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_range() {
        for i in 0..1000 {
            let name = format!("Player{i}");
            let id = ConsistentHasher::hash_to_player_id(&name, "WR", "TEAM", 500);
            assert!((1..=500).contains(&id), "Player id {id} is out of range for {name}");
        }
    }

    #[test]
    fn test_probe_wraps() {
        assert_eq!(ConsistentHasher::probe(499, 500), 500);
        assert_eq!(ConsistentHasher::probe(500, 500), 1);
    }
}
