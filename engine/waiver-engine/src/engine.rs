//! Waiver engine
//!
//! Claims are validated and stored `pending` on submission; nothing touches a roster until a
//! resolution pass. Each league's claims sit behind one mutex, which a resolution pass holds for
//! its whole run, so submissions wait for the pass and cancellations are refused during it.

use chrono::Utc;
use dashmap::DashMap;
use futures::future::join_all;
use league_events::{EventSink, LeagueEvent, WaiverAward};
use metrics::{counter, increment_counter};
use player_registry::{PlayerCatalog, PlayerId, PlayerRecord, ProjectedPoints, RankingStrategy};
use roster_store::{
    list_available, run_with_retry, LeagueId, RosterError, RosterSlot, RosterStore,
    RosterTransaction, TeamId, TeamInfo, TeamWaiverState,
};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::book::{LeagueBook, LeagueClaims};
use crate::config::{PriorityPolicyKind, WaiverEngineConfig};
use crate::error::{ClaimRejection, WaiverError};
use crate::policy::{PriorityPolicy, ReverseStandingsPriority, RollingPriority};
use crate::resolution::plan_resolution;
use crate::types::{
    ClaimId, ClaimOutcome, ClaimRequest, ClaimStatus, ClaimUpdate, FailureReason, PlayerQueue,
    ResolutionSummary, TeamWaiverInfo, WaiverClaim, WaiverWirePlayer,
};
use crate::Result;

struct Inner {
    config: WaiverEngineConfig,
    catalog: Arc<dyn PlayerCatalog>,
    store: Arc<dyn RosterStore>,
    sink: Arc<dyn EventSink>,
    policy: Arc<dyn PriorityPolicy>,
    books: DashMap<LeagueId, Arc<LeagueBook>>,
}

/// What submission validation learned about the claiming team
struct ValidatedClaim {
    team_name: String,
    player: PlayerRecord,
    waiver: TeamWaiverState,
}

/// Waiver engine handle; clones share the same claim books
#[derive(Clone)]
pub struct WaiverEngine {
    inner: Arc<Inner>,
}

impl WaiverEngine {
    /// Create an engine with the rotation named in `config`
    pub fn new(
        config: WaiverEngineConfig,
        catalog: Arc<dyn PlayerCatalog>,
        store: Arc<dyn RosterStore>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let policy: Arc<dyn PriorityPolicy> = match config.policy {
            PriorityPolicyKind::Rolling => Arc::new(RollingPriority),
            PriorityPolicyKind::ReverseStandings => Arc::new(ReverseStandingsPriority::new()),
        };
        Self::with_policy(config, catalog, store, sink, policy)
    }

    pub fn with_policy(
        config: WaiverEngineConfig,
        catalog: Arc<dyn PlayerCatalog>,
        store: Arc<dyn RosterStore>,
        sink: Arc<dyn EventSink>,
        policy: Arc<dyn PriorityPolicy>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                catalog,
                store,
                sink,
                policy,
                books: DashMap::new(),
            }),
        }
    }

    pub fn config(&self) -> &WaiverEngineConfig {
        &self.inner.config
    }

    /// Feed a league's standings, best-first, to a standings-driven rotation
    pub fn update_standings(&self, league_id: LeagueId, standings: Vec<TeamId>) -> Result<()> {
        if !self.inner.policy.set_standings(league_id, standings) {
            return Err(WaiverError::InvalidConfig(format!(
                "{} rotation does not use standings",
                self.inner.policy.name()
            )));
        }
        info!("Updated standings for league {}", league_id);
        Ok(())
    }

    /// Leagues with a claim book, ascending
    pub fn league_ids(&self) -> Vec<LeagueId> {
        let mut ids: Vec<LeagueId> = self.inner.books.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Set priority ranks 1..N in `order` and reset every budget
    ///
    /// Without an explicit order the league's registration order is used.
    pub async fn initialize_league(
        &self,
        league_id: LeagueId,
        order: Option<Vec<TeamId>>,
    ) -> Result<Vec<TeamId>> {
        let teams = self.bounded(self.inner.store.list_teams(league_id)).await?;
        let team_ids: Vec<TeamId> = teams.iter().map(|t| t.team_id).collect();

        let order = match order {
            Some(order) => {
                let given: HashSet<TeamId> = order.iter().copied().collect();
                let registered: HashSet<TeamId> = team_ids.iter().copied().collect();
                if given != registered || given.len() != order.len() {
                    return Err(WaiverError::InvalidConfig(format!(
                        "waiver order {:?} must list each of the league's teams {:?} once",
                        order, team_ids
                    )));
                }
                order
            }
            None => team_ids,
        };

        let budget = self.inner.config.budget_per_team;
        let transaction = order.iter().enumerate().fold(
            RosterTransaction::new(league_id),
            |tx, (index, &team_id)| {
                tx.set_waiver_state(
                    team_id,
                    TeamWaiverState { priority_rank: index as u32 + 1, budget },
                )
            },
        );
        self.bounded(self.inner.store.commit(transaction)).await?;
        self.book(league_id);

        info!(
            "Initialised waivers for league {}: {} teams, budget {}",
            league_id,
            order.len(),
            budget
        );
        Ok(order)
    }

    /// Validate and store a claim as `pending`
    pub async fn submit_claim(
        &self,
        league_id: LeagueId,
        request: ClaimRequest,
    ) -> Result<WaiverClaim> {
        let book = self.book(league_id);
        let mut claims = book.claims.lock().await;

        let validated = match self.validate_request(league_id, &claims, &request, None).await {
            Ok(validated) => validated,
            Err(e) => {
                if let Some(reason) = e.rejection() {
                    warn!(
                        "Rejected claim by team {} for player {} in league {}: {}",
                        request.team_id, request.player_id, league_id, reason
                    );
                    increment_counter!("waiver_claims_rejected_total");
                }
                return Err(e);
            }
        };

        let claim = WaiverClaim {
            claim_id: ClaimId::new(),
            league_id,
            team_id: request.team_id,
            player_id: request.player_id,
            drop_player_id: request.drop_player_id,
            bid_amount: request.bid_amount,
            submitted_at: Utc::now(),
            priority: validated.waiver.priority_rank,
            status: ClaimStatus::Pending,
            processed_at: None,
            failure_reason: None,
        };
        claims.insert(claim.clone());

        info!(
            "Team {} claimed {} (bid {}, priority {}) in league {}",
            claim.team_id,
            validated.player.label(),
            claim.bid_amount,
            claim.priority,
            league_id
        );
        increment_counter!("waiver_claims_submitted_total");

        self.publish(LeagueEvent::WaiverClaimSubmitted {
            league_id,
            claim_id: claim.claim_id.0,
            team_id: claim.team_id,
            team_name: validated.team_name,
            player_id: claim.player_id,
            player_name: validated.player.name,
            drop_player_id: claim.drop_player_id,
            bid_amount: claim.bid_amount,
            priority: claim.priority,
            timestamp: claim.submitted_at,
        });

        Ok(claim)
    }

    /// Run submission validation without storing anything
    pub async fn validate_claim(&self, league_id: LeagueId, request: &ClaimRequest) -> Result<()> {
        let book = self.book(league_id);
        let claims = book.claims.lock().await;
        self.validate_request(league_id, &claims, request, None).await.map(|_| ())
    }

    /// Withdraw a pending claim; only its owner may, and not while resolution runs
    pub async fn cancel_claim(
        &self,
        league_id: LeagueId,
        claim_id: ClaimId,
        team_id: TeamId,
    ) -> Result<WaiverClaim> {
        let book = self.existing_book(league_id, claim_id)?;
        if book.is_resolving() {
            return Err(ClaimRejection::ResolutionInProgress.into());
        }

        let mut claims = book.claims.lock().await;
        let claim = claims.get_mut(&claim_id).ok_or(WaiverError::ClaimNotFound(claim_id))?;
        Self::check_amendable(claim, team_id)?;

        claim.status = ClaimStatus::Cancelled;
        claim.processed_at = Some(Utc::now());
        let cancelled = claim.clone();

        info!("Team {} cancelled claim {} in league {}", team_id, claim_id, league_id);
        increment_counter!("waiver_claims_cancelled_total");

        self.publish(LeagueEvent::WaiverClaimCancelled {
            league_id,
            claim_id: claim_id.0,
            team_id,
            player_id: cancelled.player_id,
            timestamp: Utc::now(),
        });

        Ok(cancelled)
    }

    /// Change the bid or drop player of a pending claim
    ///
    /// The amended claim is validated as a fresh submission, ignoring itself; priority and
    /// submission time are kept.
    pub async fn update_claim(
        &self,
        league_id: LeagueId,
        claim_id: ClaimId,
        team_id: TeamId,
        update: ClaimUpdate,
    ) -> Result<WaiverClaim> {
        let book = self.existing_book(league_id, claim_id)?;
        if book.is_resolving() {
            return Err(ClaimRejection::ResolutionInProgress.into());
        }

        let mut claims = book.claims.lock().await;
        let current = claims.get(&claim_id).cloned().ok_or(WaiverError::ClaimNotFound(claim_id))?;
        Self::check_amendable(&current, team_id)?;

        let request = ClaimRequest {
            team_id,
            player_id: current.player_id,
            drop_player_id: update.drop_player_id.unwrap_or(current.drop_player_id),
            bid_amount: update.bid_amount.unwrap_or(current.bid_amount),
        };
        self.validate_request(league_id, &claims, &request, Some(claim_id)).await?;

        let claim = claims.get_mut(&claim_id).ok_or(WaiverError::ClaimNotFound(claim_id))?;
        claim.bid_amount = request.bid_amount;
        claim.drop_player_id = request.drop_player_id;

        debug!(
            "Updated claim {}: bid {}, drop {:?}",
            claim_id, claim.bid_amount, claim.drop_player_id
        );
        Ok(claim.clone())
    }

    pub async fn get_claim(&self, league_id: LeagueId, claim_id: ClaimId) -> Result<WaiverClaim> {
        let book = self.existing_book(league_id, claim_id)?;
        let claims = book.claims.lock().await;
        claims.get(&claim_id).cloned().ok_or(WaiverError::ClaimNotFound(claim_id))
    }

    /// Claims ordered by priority then submission time
    pub async fn claims(
        &self,
        league_id: LeagueId,
        team_id: Option<TeamId>,
        status: Option<ClaimStatus>,
    ) -> Vec<WaiverClaim> {
        match self.existing(league_id) {
            Some(book) => book.claims.lock().await.list(team_id, status),
            None => Vec::new(),
        }
    }

    pub async fn team_waiver_info(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> Result<TeamWaiverInfo> {
        let waiver = self.bounded(self.inner.store.waiver_state(league_id, team_id)).await?;

        let (pending_claims, total_pending_bids) =
            match self.existing(league_id) {
                Some(book) => {
                    let claims = book.claims.lock().await;
                    (claims.pending_for_team(team_id).count(), claims.pending_bids(team_id, None))
                }
                None => (0, 0),
            };

        Ok(TeamWaiverInfo {
            league_id,
            team_id,
            priority_rank: waiver.priority_rank,
            budget: waiver.budget,
            pending_claims,
            total_pending_bids,
            available_budget: waiver.budget.saturating_sub(total_pending_bids),
        })
    }

    /// Teams in waiver order, first pick first
    pub async fn priority_order(&self, league_id: LeagueId) -> Result<Vec<TeamId>> {
        Ok(self.standing(league_id).await?.into_iter().map(|(team, _)| team.team_id).collect())
    }

    /// Unrostered players by projected points, with pending claim activity
    pub async fn waiver_wire(
        &self,
        league_id: LeagueId,
        position: Option<&str>,
        limit: usize,
    ) -> Result<Vec<WaiverWirePlayer>> {
        let mut players = self
            .bounded(list_available(
                self.inner.catalog.as_ref(),
                self.inner.store.as_ref(),
                league_id,
                position,
            ))
            .await?;
        ProjectedPoints.sort_best_first(&mut players);
        players.truncate(limit);

        let mut activity: HashMap<PlayerId, (usize, u32)> = HashMap::new();
        if let Some(book) = self.existing(league_id) {
            for claim in book.claims.lock().await.pending() {
                let entry = activity.entry(claim.player_id).or_insert((0, 0));
                entry.0 += 1;
                entry.1 = entry.1.max(claim.bid_amount);
            }
        }

        Ok(players
            .into_iter()
            .map(|player| {
                let (pending_claims, highest_bid) = match activity.get(&player.player_id) {
                    Some(&(count, bid)) => (count, Some(bid)),
                    None => (0, None),
                };
                WaiverWirePlayer { player, pending_claims, highest_bid }
            })
            .collect())
    }

    /// Candidate order the next resolution pass would use; nothing is executed
    pub async fn preview_resolution(&self, league_id: LeagueId) -> Vec<PlayerQueue> {
        match self.existing(league_id) {
            Some(book) => plan_resolution(book.claims.lock().await.pending()),
            None => Vec::new(),
        }
    }

    /// Resolve every pending claim in a league
    ///
    /// Running again with nothing pending returns an empty summary and publishes nothing.
    pub async fn resolve(&self, league_id: LeagueId) -> Result<ResolutionSummary> {
        let book = self.book(league_id);
        let _resolving = book.begin_resolution();
        let mut claims = book.claims.lock().await;
        self.resolve_locked(league_id, &mut claims).await
    }

    /// Resolve several leagues concurrently
    pub async fn resolve_all(
        &self,
        league_ids: &[LeagueId],
    ) -> Vec<(LeagueId, Result<ResolutionSummary>)> {
        join_all(league_ids.iter().map(|&league_id| async move {
            (league_id, self.resolve(league_id).await)
        }))
        .await
    }

    fn book(&self, league_id: LeagueId) -> Arc<LeagueBook> {
        Arc::clone(self.inner.books.entry(league_id).or_default().value())
    }

    fn existing(&self, league_id: LeagueId) -> Option<Arc<LeagueBook>> {
        let entry = self.inner.books.get(&league_id)?;
        Some(Arc::clone(entry.value()))
    }

    fn existing_book(&self, league_id: LeagueId, claim_id: ClaimId) -> Result<Arc<LeagueBook>> {
        self.existing(league_id).ok_or(WaiverError::ClaimNotFound(claim_id))
    }

    fn check_amendable(claim: &WaiverClaim, team_id: TeamId) -> Result<()> {
        if claim.team_id != team_id {
            return Err(ClaimRejection::NotClaimOwner { owner: claim.team_id }.into());
        }
        if !claim.is_pending() {
            return Err(ClaimRejection::ClaimNotPending(claim.status).into());
        }
        Ok(())
    }

    fn publish(&self, event: LeagueEvent) {
        self.inner.sink.publish(event);
    }

    /// Bound a catalog or store call by the configured timeout
    async fn bounded<T, E>(&self, fut: impl Future<Output = std::result::Result<T, E>>) -> Result<T>
    where
        WaiverError: From<E>,
    {
        let timeout_ms = self.inner.config.io_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
            Ok(result) => result.map_err(WaiverError::from),
            Err(_) => Err(WaiverError::Timeout(timeout_ms)),
        }
    }

    /// Checks run in order; the first failure is reported
    async fn validate_request(
        &self,
        league_id: LeagueId,
        claims: &LeagueClaims,
        request: &ClaimRequest,
        exclude: Option<ClaimId>,
    ) -> Result<ValidatedClaim> {
        let team_id = request.team_id;
        let roster = match self.bounded(self.inner.store.get_roster(league_id, team_id)).await {
            Ok(roster) => roster,
            Err(WaiverError::Roster(
                RosterError::TeamNotFound { .. } | RosterError::LeagueNotFound(_),
            )) => return Err(ClaimRejection::TeamNotFound(team_id).into()),
            Err(e) => return Err(e),
        };

        let player = self
            .bounded(self.inner.catalog.get_player(request.player_id))
            .await?
            .ok_or(ClaimRejection::PlayerNotFound(request.player_id))?;

        if self.bounded(self.inner.store.owner_of(league_id, request.player_id)).await?.is_some() {
            return Err(ClaimRejection::PlayerAlreadyRostered(request.player_id).into());
        }

        if claims.has_pending(team_id, request.player_id, exclude) {
            return Err(ClaimRejection::DuplicateClaim(request.player_id).into());
        }

        if let Some(drop_player_id) = request.drop_player_id {
            if !roster.contains(drop_player_id) {
                return Err(ClaimRejection::DropNotOnRoster(drop_player_id).into());
            }
        }

        let freed = usize::from(request.drop_player_id.is_some());
        if roster.players.len().saturating_sub(freed) >= roster.capacity {
            return Err(ClaimRejection::RosterFull { capacity: roster.capacity }.into());
        }

        let waiver = self.bounded(self.inner.store.waiver_state(league_id, team_id)).await?;
        let available = waiver.budget.saturating_sub(claims.pending_bids(team_id, exclude));
        if request.bid_amount > available {
            return Err(ClaimRejection::InsufficientBudget { bid: request.bid_amount, available }
                .into());
        }

        Ok(ValidatedClaim { team_name: roster.team_name, player, waiver })
    }

    /// Teams with their waiver state, sorted by priority rank
    async fn standing(&self, league_id: LeagueId) -> Result<Vec<(TeamInfo, TeamWaiverState)>> {
        let teams = self.bounded(self.inner.store.list_teams(league_id)).await?;
        let mut standing = Vec::with_capacity(teams.len());
        for team in teams {
            let state = self.bounded(self.inner.store.waiver_state(league_id, team.team_id)).await?;
            standing.push((team, state));
        }
        standing.sort_by_key(|(team, state)| (state.priority_rank, team.team_id));
        Ok(standing)
    }

    async fn resolve_locked(
        &self,
        league_id: LeagueId,
        claims: &mut LeagueClaims,
    ) -> Result<ResolutionSummary> {
        let plan = plan_resolution(claims.pending());
        if plan.is_empty() {
            debug!("No pending claims in league {}", league_id);
            return Ok(ResolutionSummary::empty(league_id));
        }

        let standing = self.standing(league_id).await?;
        let before: Vec<TeamId> = standing.iter().map(|(team, _)| team.team_id).collect();
        let team_names: HashMap<TeamId, String> =
            standing.into_iter().map(|(team, _)| (team.team_id, team.name)).collect();

        info!("Resolving waivers for league {}: {} contested players", league_id, plan.len());

        let mut winners: HashSet<TeamId> = HashSet::new();
        let mut awards = Vec::new();
        let mut outcomes = Vec::new();

        for queue in &plan {
            // Once set, every remaining candidate for this player fails with this reason
            let mut settled: Option<FailureReason> = None;
            for claim_id in &queue.candidates {
                let Some(claim) = claims.get(claim_id).cloned() else {
                    continue;
                };

                let result = match settled {
                    Some(reason) => Err(reason),
                    None => self.execute_claim(&claim).await,
                };

                let Some(stored) = claims.get_mut(claim_id) else {
                    continue;
                };
                stored.processed_at = Some(Utc::now());
                match result {
                    Ok(()) => {
                        stored.status = ClaimStatus::Successful;
                        settled = Some(FailureReason::OutbidOrLowerPriority);
                        winners.insert(claim.team_id);
                        awards.push(self.award_for(&claim, &team_names).await);
                        info!(
                            "Team {} won player {} for {} in league {}",
                            claim.team_id, claim.player_id, claim.bid_amount, league_id
                        );
                    }
                    Err(reason) => {
                        // A store outage must not hand the player to a lower-priority claim
                        if reason == FailureReason::ExecutionFailed && settled.is_none() {
                            warn!(
                                "Execution failed for player {} in league {}, failing the rest",
                                claim.player_id, league_id
                            );
                            settled = Some(FailureReason::ExecutionFailed);
                        }
                        stored.status = ClaimStatus::Failed;
                        stored.failure_reason = Some(reason);
                        debug!("Claim {} failed: {}", claim_id, reason);
                    }
                }

                outcomes.push(ClaimOutcome {
                    claim_id: *claim_id,
                    team_id: stored.team_id,
                    player_id: stored.player_id,
                    bid_amount: stored.bid_amount,
                    status: stored.status,
                    failure_reason: stored.failure_reason,
                });
            }
        }

        let priority_order = self.inner.policy.reorder(league_id, &before, &winners);
        let priority_updated = match run_with_retry(
            || self.write_priority_order(league_id, &priority_order),
            &self.inner.config.retry,
            WaiverError::is_transient,
        )
        .await
        {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to rotate waiver priority for league {}: {}", league_id, e);
                false
            }
        };

        let successful = awards.len() as u32;
        let processed = outcomes.len() as u32;
        let failed = processed - successful;

        increment_counter!("waiver_resolutions_total");
        counter!("waiver_claims_won_total", successful as u64);
        counter!("waiver_claims_failed_total", failed as u64);
        info!(
            "Waivers resolved for league {}: {} processed, {} successful, {} failed ({} rotation)",
            league_id,
            processed,
            successful,
            failed,
            self.inner.policy.name()
        );

        let summary = ResolutionSummary {
            league_id,
            processed,
            successful,
            failed,
            outcomes,
            priority_order,
            priority_updated,
            resolved_at: Utc::now(),
        };

        self.publish(LeagueEvent::WaiverResultsProcessed {
            league_id,
            processed,
            successful,
            failed,
            awards,
            timestamp: summary.resolved_at,
        });

        Ok(summary)
    }

    /// Execute one winning claim, retrying transient store failures
    ///
    /// A claim that keeps failing leaves the roster untouched and reports `ExecutionFailed`.
    async fn execute_claim(&self, claim: &WaiverClaim) -> std::result::Result<(), FailureReason> {
        let result = run_with_retry(
            || self.try_execute(claim),
            &self.inner.config.retry,
            WaiverError::is_transient,
        )
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Claim {} could not be executed: {}", claim.claim_id, e);
                Err(FailureReason::ExecutionFailed)
            }
        }
    }

    /// One execution attempt; the outer error is a store or catalog failure
    async fn try_execute(
        &self,
        claim: &WaiverClaim,
    ) -> Result<std::result::Result<(), FailureReason>> {
        let league_id = claim.league_id;
        let store = &self.inner.store;

        if self.bounded(store.owner_of(league_id, claim.player_id)).await?.is_some() {
            return Ok(Err(FailureReason::PlayerNoLongerAvailable));
        }

        let roster = self.bounded(store.get_roster(league_id, claim.team_id)).await?;
        if let Some(drop_player_id) = claim.drop_player_id {
            if !roster.contains(drop_player_id) {
                return Ok(Err(FailureReason::DropNoLongerOnRoster));
            }
        }
        let freed = usize::from(claim.drop_player_id.is_some());
        if roster.players.len().saturating_sub(freed) >= roster.capacity {
            return Ok(Err(FailureReason::RosterFull));
        }

        let waiver = self.bounded(store.waiver_state(league_id, claim.team_id)).await?;
        if waiver.budget < claim.bid_amount {
            return Ok(Err(FailureReason::InsufficientBudget));
        }

        let mut transaction = RosterTransaction::new(league_id);
        if let Some(drop_player_id) = claim.drop_player_id {
            transaction = transaction.remove(claim.team_id, drop_player_id);
        }
        transaction = transaction.add(claim.team_id, claim.player_id, RosterSlot::Bench);
        if claim.bid_amount > 0 {
            transaction = transaction.debit_budget(claim.team_id, claim.bid_amount);
        }

        match self.bounded(store.commit(transaction)).await {
            Ok(()) => Ok(Ok(())),
            Err(WaiverError::Roster(err)) => match err {
                RosterError::PlayerAlreadyRostered { .. } => {
                    Ok(Err(FailureReason::PlayerNoLongerAvailable))
                }
                RosterError::PlayerNotOnRoster { .. } => {
                    Ok(Err(FailureReason::DropNoLongerOnRoster))
                }
                RosterError::RosterFull { .. } => Ok(Err(FailureReason::RosterFull)),
                RosterError::InsufficientBudget { .. } => {
                    Ok(Err(FailureReason::InsufficientBudget))
                }
                other => Err(WaiverError::Roster(other)),
            },
            Err(e) => Err(e),
        }
    }

    /// Write ranks 1..N in `order`, keeping each team's current budget
    async fn write_priority_order(&self, league_id: LeagueId, order: &[TeamId]) -> Result<()> {
        let mut transaction = RosterTransaction::new(league_id);
        for (index, &team_id) in order.iter().enumerate() {
            let state = self.bounded(self.inner.store.waiver_state(league_id, team_id)).await?;
            transaction = transaction.set_waiver_state(
                team_id,
                TeamWaiverState { priority_rank: index as u32 + 1, budget: state.budget },
            );
        }
        self.bounded(self.inner.store.commit(transaction)).await
    }

    async fn award_for(
        &self,
        claim: &WaiverClaim,
        team_names: &HashMap<TeamId, String>,
    ) -> WaiverAward {
        let player_name = match self.bounded(self.inner.catalog.get_player(claim.player_id)).await {
            Ok(Some(player)) => player.name,
            _ => format!("Player {}", claim.player_id),
        };

        WaiverAward {
            claim_id: claim.claim_id.0,
            team_id: claim.team_id,
            team_name: team_names
                .get(&claim.team_id)
                .cloned()
                .unwrap_or_else(|| format!("Team {}", claim.team_id)),
            player_id: claim.player_id,
            player_name,
            drop_player_id: claim.drop_player_id,
            bid_amount: claim.bid_amount,
        }
    }
}
