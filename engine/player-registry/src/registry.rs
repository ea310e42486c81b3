use crate::catalog::PlayerCatalog;
use crate::hashing::ConsistentHasher;
use crate::ranking::{ProjectedPoints, RankingStrategy};
use crate::types::{CatalogEntry, CatalogError, CatalogFile, PlayerId, PlayerRecord};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Maximum probes when resolving a hashed id collision
const MAX_PROBE_ATTEMPTS: u32 = 1000;

/// Player Registry - in-memory player catalog
///
/// Loaded from a season projections file. Entries that carry a `player_id` keep it;
/// entries without one get a consistent-hash id so repeated loads agree.
pub struct PlayerRegistry {
    /// Map from player ID to record
    players_by_id: HashMap<PlayerId, PlayerRecord>,

    /// Map from player name to ID (for quick lookup)
    players_by_name: HashMap<String, PlayerId>,

    season: Option<String>,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { players_by_id: HashMap::new(), players_by_name: HashMap::new(), season: None }
    }

    /// Build a registry from records that already carry ids
    pub fn from_records(records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        let mut registry = Self::new();
        for record in records {
            registry.players_by_name.insert(record.name.clone(), record.player_id);
            registry.players_by_id.insert(record.player_id, record);
        }
        registry
    }

    /// Load a projections JSON file and build the id mappings
    pub async fn load_from_file<P: AsRef<Path>>(&mut self, file_path: P) -> Result<()> {
        info!("Loading player data from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let catalog: CatalogFile = serde_json::from_str(&json_content)?;

        info!("Loaded {} players for season {}", catalog.players.len(), catalog.season);

        self.create_mappings(&catalog.players)?;
        self.season = Some(catalog.season);

        info!("Created {} player mappings", self.players_by_id.len());
        Ok(())
    }

    /// Create id mappings from projection entries
    fn create_mappings(&mut self, entries: &[CatalogEntry]) -> Result<()> {
        self.players_by_id.clear();
        self.players_by_name.clear();

        // Explicit ids first so hashed ids probe around them
        for entry in entries.iter().filter(|e| e.player_id.is_some()) {
            if let Some(player_id) = entry.player_id {
                if self.players_by_id.contains_key(&player_id) {
                    warn!("Duplicate player id {} for {}, keeping first", player_id, entry.name);
                    continue;
                }
                self.insert_entry(player_id, entry);
            }
        }

        // Twice the entry count keeps collisions rare
        let max_ids = (entries.len() as u32).saturating_mul(2).max(1);

        for entry in entries.iter().filter(|e| e.player_id.is_none()) {
            let mut player_id = ConsistentHasher::hash_to_player_id(
                &entry.name,
                &entry.position,
                &entry.team,
                max_ids,
            );

            let mut attempts = 0;
            while self.players_by_id.contains_key(&player_id) && attempts < MAX_PROBE_ATTEMPTS {
                player_id = ConsistentHasher::probe(player_id, max_ids);
                attempts += 1;
            }

            if self.players_by_id.contains_key(&player_id) {
                return Err(CatalogError::IdExhausted(entry.name.clone()));
            }

            if attempts > 0 {
                info!(
                    "Resolved id collision for {} after {} attempts, using player id {}",
                    entry.name, attempts, player_id
                );
            }

            self.insert_entry(player_id, entry);
        }

        Ok(())
    }

    fn insert_entry(&mut self, player_id: PlayerId, entry: &CatalogEntry) {
        let record = PlayerRecord {
            player_id,
            name: entry.name.clone(),
            position: entry.position.clone(),
            team: entry.team.clone(),
            projected_points: entry.projected_points,
            stats: entry.stats.clone(),
        };
        self.players_by_name.insert(entry.name.clone(), player_id);
        self.players_by_id.insert(player_id, record);
    }

    /// Get a player by id
    pub fn get_by_id(&self, player_id: PlayerId) -> Option<&PlayerRecord> {
        self.players_by_id.get(&player_id)
    }

    /// Get a player by exact name
    pub fn get_by_name(&self, name: &str) -> Option<&PlayerRecord> {
        self.players_by_name.get(name).and_then(|id| self.players_by_id.get(id))
    }

    /// Top N players by projected points
    pub fn get_top_players(&self, limit: usize) -> Vec<PlayerRecord> {
        let mut players: Vec<PlayerRecord> = self.players_by_id.values().cloned().collect();
        ProjectedPoints.sort_best_first(&mut players);
        players.truncate(limit);
        players
    }

    /// Case-insensitive partial name search
    pub fn search_players(&self, query: &str) -> Vec<&PlayerRecord> {
        let query_lower = query.to_lowercase();
        self.players_by_id
            .values()
            .filter(|player| player.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players_by_id.is_empty()
    }

    pub fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerCatalog for PlayerRegistry {
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>> {
        Ok(self.players_by_id.get(&player_id).cloned())
    }

    async fn list_players(&self, position: Option<&str>) -> Result<Vec<PlayerRecord>> {
        Ok(self
            .players_by_id
            .values()
            .filter(|p| position.map_or(true, |pos| p.position.eq_ignore_ascii_case(pos)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;

    fn create_test_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry {
                player_id: None,
                name: "Lamar Jackson".to_string(),
                position: "QB".to_string(),
                team: "BAL".to_string(),
                projected_points: 351.96,
                stats: None,
            },
            CatalogEntry {
                player_id: None,
                name: "Josh Allen".to_string(),
                position: "QB".to_string(),
                team: "BUF".to_string(),
                projected_points: 341.48,
                stats: None,
            },
            CatalogEntry {
                player_id: Some(4),
                name: "Bijan Robinson".to_string(),
                position: "RB".to_string(),
                team: "ATL".to_string(),
                projected_points: 298.1,
                stats: None,
            },
        ]
    }

    #[test]
    fn test_registry_creation() {
        let mut registry = PlayerRegistry::new();
        registry.create_mappings(&create_test_entries()).unwrap();

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.get_by_id(4).unwrap().name, "Bijan Robinson");
    }

    #[test]
    fn test_hashed_ids_are_stable() {
        let mut first = PlayerRegistry::new();
        first.create_mappings(&create_test_entries()).unwrap();
        let mut second = PlayerRegistry::new();
        second.create_mappings(&create_test_entries()).unwrap();

        let a = first.get_by_name("Lamar Jackson").unwrap().player_id;
        let b = second.get_by_name("Lamar Jackson").unwrap().player_id;
        assert_eq!(a, b);
        assert_ne!(a, 4);
    }

    #[test]
    fn test_search_players() {
        let mut registry = PlayerRegistry::new();
        registry.create_mappings(&create_test_entries()).unwrap();

        let results = registry.search_players("josh");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Josh Allen");
    }

    #[tokio::test]
    async fn test_catalog_position_filter() {
        let mut registry = PlayerRegistry::new();
        registry.create_mappings(&create_test_entries()).unwrap();

        let qbs = registry.list_players(Some("qb")).await.unwrap();
        assert_eq!(qbs.len(), 2);
        assert!(registry.get_player(999_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let catalog = CatalogFile {
            season: "2025".to_string(),
            last_updated: Utc::now(),
            players: create_test_entries(),
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&catalog).unwrap().as_bytes()).unwrap();

        let mut registry = PlayerRegistry::new();
        registry.load_from_file(file.path()).await.unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.season(), Some("2025"));
        assert_eq!(registry.get_top_players(1)[0].name, "Lamar Jackson");
    }
}
