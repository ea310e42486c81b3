//! Per-league claim book

use player_registry::PlayerId;
use roster_store::TeamId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::types::{ClaimId, ClaimStatus, WaiverClaim};

/// Every claim ever submitted in one league, keyed by id
#[derive(Debug, Default)]
pub(crate) struct LeagueClaims {
    claims: HashMap<ClaimId, WaiverClaim>,
}

impl LeagueClaims {
    pub fn insert(&mut self, claim: WaiverClaim) {
        self.claims.insert(claim.claim_id, claim);
    }

    pub fn get(&self, claim_id: &ClaimId) -> Option<&WaiverClaim> {
        self.claims.get(claim_id)
    }

    pub fn get_mut(&mut self, claim_id: &ClaimId) -> Option<&mut WaiverClaim> {
        self.claims.get_mut(claim_id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &WaiverClaim> {
        self.claims.values().filter(|c| c.is_pending())
    }

    pub fn pending_for_team(&self, team_id: TeamId) -> impl Iterator<Item = &WaiverClaim> {
        self.pending().filter(move |c| c.team_id == team_id)
    }

    /// Whether `team_id` already has a pending claim on `player_id`, ignoring `exclude`
    pub fn has_pending(
        &self,
        team_id: TeamId,
        player_id: PlayerId,
        exclude: Option<ClaimId>,
    ) -> bool {
        self.pending_for_team(team_id)
            .any(|c| c.player_id == player_id && Some(c.claim_id) != exclude)
    }

    /// Sum of the team's pending bids, ignoring `exclude`
    pub fn pending_bids(&self, team_id: TeamId, exclude: Option<ClaimId>) -> u32 {
        self.pending_for_team(team_id)
            .filter(|c| Some(c.claim_id) != exclude)
            .map(|c| c.bid_amount)
            .fold(0u32, u32::saturating_add)
    }

    /// Claims ordered by priority then submission time
    pub fn list(&self, team_id: Option<TeamId>, status: Option<ClaimStatus>) -> Vec<WaiverClaim> {
        let mut claims: Vec<WaiverClaim> = self
            .claims
            .values()
            .filter(|c| team_id.map_or(true, |t| c.team_id == t))
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        claims.sort_by_key(|c| (c.priority, c.submitted_at, c.claim_id));
        claims
    }
}

/// Claims for one league plus a marker for a running resolution pass
#[derive(Debug, Default)]
pub(crate) struct LeagueBook {
    pub claims: Mutex<LeagueClaims>,
    resolving: AtomicUsize,
}

impl LeagueBook {
    pub fn is_resolving(&self) -> bool {
        self.resolving.load(Ordering::SeqCst) > 0
    }

    /// Mark a resolution pass as started until the guard drops
    pub fn begin_resolution(&self) -> ResolvingGuard<'_> {
        self.resolving.fetch_add(1, Ordering::SeqCst);
        ResolvingGuard { resolving: &self.resolving }
    }
}

pub(crate) struct ResolvingGuard<'a> {
    resolving: &'a AtomicUsize,
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.resolving.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_claim(team_id: TeamId, player_id: PlayerId, bid: u32) -> WaiverClaim {
        WaiverClaim {
            claim_id: ClaimId::new(),
            league_id: 1,
            team_id,
            player_id,
            drop_player_id: None,
            bid_amount: bid,
            submitted_at: Utc::now(),
            priority: team_id,
            status: ClaimStatus::Pending,
            processed_at: None,
            failure_reason: None,
        }
    }

    #[test]
    fn test_pending_bids_excludes_other_states() {
        let mut book = LeagueClaims::default();
        let first = create_test_claim(1, 10, 30);
        let mut cancelled = create_test_claim(1, 11, 50);
        cancelled.status = ClaimStatus::Cancelled;
        book.insert(first.clone());
        book.insert(cancelled);
        book.insert(create_test_claim(2, 10, 70));

        assert_eq!(book.pending_bids(1, None), 30);
        assert_eq!(book.pending_bids(1, Some(first.claim_id)), 0);
        assert!(book.has_pending(1, 10, None));
        assert!(!book.has_pending(1, 10, Some(first.claim_id)));
        assert!(!book.has_pending(1, 11, None));
    }

    #[test]
    fn test_list_filters_and_orders() {
        let mut book = LeagueClaims::default();
        book.insert(create_test_claim(3, 10, 1));
        book.insert(create_test_claim(1, 11, 1));
        book.insert(create_test_claim(2, 12, 1));

        let teams: Vec<TeamId> = book.list(None, None).iter().map(|c| c.team_id).collect();
        assert_eq!(teams, vec![1, 2, 3]);
        assert_eq!(book.list(Some(2), Some(ClaimStatus::Pending)).len(), 1);
        assert!(book.list(None, Some(ClaimStatus::Failed)).is_empty());
    }

    #[test]
    fn test_resolving_guard() {
        let book = LeagueBook::default();
        assert!(!book.is_resolving());
        {
            let _outer = book.begin_resolution();
            let _inner = book.begin_resolution();
            assert!(book.is_resolving());
        }
        assert!(!book.is_resolving());
    }
}
