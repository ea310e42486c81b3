//! Waiver priority rotation applied after each resolution pass

use parking_lot::RwLock;
use roster_store::{LeagueId, TeamId};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Computes the next waiver order
///
/// `current` is the order before the pass, first pick first. The result must be a permutation
/// of `current`.
pub trait PriorityPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn reorder(
        &self,
        league_id: LeagueId,
        current: &[TeamId],
        winners: &HashSet<TeamId>,
    ) -> Vec<TeamId>;

    /// Record a league's standings, best-first; false when the policy ignores standings
    fn set_standings(&self, _league_id: LeagueId, _standings: Vec<TeamId>) -> bool {
        false
    }
}

/// Teams that won a claim move to the back, keeping their relative order
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingPriority;

impl PriorityPolicy for RollingPriority {
    fn name(&self) -> &'static str {
        "rolling"
    }

    fn reorder(
        &self,
        _league_id: LeagueId,
        current: &[TeamId],
        winners: &HashSet<TeamId>,
    ) -> Vec<TeamId> {
        let (won, kept): (Vec<TeamId>, Vec<TeamId>) =
            current.iter().partition(|team| winners.contains(team));
        kept.into_iter().chain(won).collect()
    }
}

/// Worst-placed team picks first regardless of claims won
///
/// Standings are kept per league, best-first. Teams missing from a league's standings keep
/// their current relative order behind the ranked ones. A league with no standings rotates
/// like [`RollingPriority`].
#[derive(Debug, Default)]
pub struct ReverseStandingsPriority {
    standings: RwLock<HashMap<LeagueId, Vec<TeamId>>>,
}

impl ReverseStandingsPriority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standings(self, league_id: LeagueId, standings: Vec<TeamId>) -> Self {
        self.update_standings(league_id, standings);
        self
    }

    pub fn update_standings(&self, league_id: LeagueId, standings: Vec<TeamId>) {
        self.standings.write().insert(league_id, standings);
    }

    pub fn standings(&self, league_id: LeagueId) -> Option<Vec<TeamId>> {
        self.standings.read().get(&league_id).cloned()
    }
}

impl PriorityPolicy for ReverseStandingsPriority {
    fn name(&self) -> &'static str {
        "reverse_standings"
    }

    fn reorder(
        &self,
        league_id: LeagueId,
        current: &[TeamId],
        winners: &HashSet<TeamId>,
    ) -> Vec<TeamId> {
        let all = self.standings.read();
        let Some(standings) = all.get(&league_id) else {
            warn!("No standings for league {}, rotating winners to the back", league_id);
            return RollingPriority.reorder(league_id, current, winners);
        };
        let members: HashSet<TeamId> = current.iter().copied().collect();

        let mut order: Vec<TeamId> =
            standings.iter().rev().copied().filter(|team| members.contains(team)).collect();
        let ranked: HashSet<TeamId> = order.iter().copied().collect();
        order.extend(current.iter().copied().filter(|team| !ranked.contains(team)));
        order
    }

    fn set_standings(&self, league_id: LeagueId, standings: Vec<TeamId>) -> bool {
        self.update_standings(league_id, standings);
        true
    }
}
