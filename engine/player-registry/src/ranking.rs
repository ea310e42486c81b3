//! Pluggable ranking used to order available players for auto-selection

use std::cmp::Ordering;

use crate::types::PlayerRecord;

/// Scores a player; higher is better
pub trait RankingStrategy: Send + Sync {
    fn score(&self, player: &PlayerRecord) -> f64;

    /// Sort best-first. Equal scores fall back to player id so the order is total.
    fn sort_best_first(&self, players: &mut [PlayerRecord]) {
        players.sort_by(|a, b| self.compare(a, b));
    }

    /// Ordering where the better player compares as `Less`
    fn compare(&self, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        self.score(b).total_cmp(&self.score(a)).then_with(|| a.player_id.cmp(&b.player_id))
    }
}

/// Rank by season projected points
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectedPoints;

impl RankingStrategy for ProjectedPoints {
    fn score(&self, player: &PlayerRecord) -> f64 {
        player.projected_points
    }
}

/// Weighted form ranking over season stats
///
/// `0.4 * total_points + 0.3 * (10 * ppg) + 0.2 * (5 * form) + 0.1 * selected%`, floored at
/// zero. Players without stats fall back to projected points.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedForm;

impl RankingStrategy for WeightedForm {
    fn score(&self, player: &PlayerRecord) -> f64 {
        match &player.stats {
            Some(stats) => {
                let score = stats.total_points * 0.4
                    + stats.points_per_game * 10.0 * 0.3
                    + stats.form * 5.0 * 0.2
                    + stats.selected_by_percent * 0.1;
                score.max(0.0)
            }
            None => player.projected_points,
        }
    }
}
