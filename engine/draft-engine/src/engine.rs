//! Draft engine
//!
//! Owns every draft's state machine and its pick timer. Picks for one draft are serialized by
//! that draft's mutex; a pick for a number that has already advanced fails the turn check.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use league_events::{AlertSeverity, EventSink, LeagueEvent, PickEvent};
use metrics::increment_counter;
use player_registry::{PlayerCatalog, PlayerId, PlayerRecord, ProjectedPoints, RankingStrategy};
use roster_store::{
    list_available, run_with_retry, LeagueId, RosterError, RosterSlot, RosterStore, TeamId,
};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::auto_pick::{position_counts, select_auto_pick};
use crate::config::{DraftConfig, DraftEngineConfig};
use crate::error::{DraftError, PickRejection};
use crate::mock::{simulate_draft, MockDraft};
use crate::order::{generate_turn_order, DraftOrder};
use crate::timer::PickTimers;
use crate::types::{Draft, DraftId, DraftStatus, DraftStatusView, Pick};
use crate::Result;

/// Identifies the armed timer a deadline expiry belongs to
#[derive(Debug, Clone, Copy)]
struct DeadlineToken {
    pick_number: u32,
    generation: u64,
}

struct Inner {
    config: DraftEngineConfig,
    catalog: Arc<dyn PlayerCatalog>,
    store: Arc<dyn RosterStore>,
    sink: Arc<dyn EventSink>,
    ranking: Arc<dyn RankingStrategy>,
    drafts: DashMap<DraftId, Arc<Mutex<Draft>>>,
    timers: PickTimers,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.timers.cancel_all();
    }
}

/// Draft engine handle; clones share the same drafts and timers
#[derive(Clone)]
pub struct DraftEngine {
    inner: Arc<Inner>,
}

impl DraftEngine {
    /// Create an engine ranking players by projected points
    pub fn new(
        config: DraftEngineConfig,
        catalog: Arc<dyn PlayerCatalog>,
        store: Arc<dyn RosterStore>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self::with_ranking(config, catalog, store, sink, Arc::new(ProjectedPoints))
    }

    pub fn with_ranking(
        config: DraftEngineConfig,
        catalog: Arc<dyn PlayerCatalog>,
        store: Arc<dyn RosterStore>,
        sink: Arc<dyn EventSink>,
        ranking: Arc<dyn RankingStrategy>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                catalog,
                store,
                sink,
                ranking,
                drafts: DashMap::new(),
                timers: PickTimers::new(),
            }),
        }
    }

    pub fn config(&self) -> &DraftEngineConfig {
        &self.inner.config
    }

    /// Create a scheduled draft for a league's registered teams
    ///
    /// `config` falls back to the engine defaults.
    pub async fn create_draft(
        &self,
        league_id: LeagueId,
        config: Option<DraftConfig>,
        order: DraftOrder,
    ) -> Result<DraftId> {
        let config = config.unwrap_or_else(|| self.inner.config.defaults.clone());
        config.validate().map_err(DraftError::InvalidConfig)?;

        let teams = self.bounded(self.inner.store.list_teams(league_id)).await?;
        let team_ids: Vec<TeamId> = teams.iter().map(|t| t.team_id).collect();
        let base_order = order.base_order(&team_ids)?;
        let turn_order = generate_turn_order(&base_order, config.rounds, config.draft_type);

        let draft_id = DraftId::new();
        let draft = Draft {
            draft_id,
            league_id,
            draft_order_type: order.order_type(),
            base_order,
            turn_order,
            team_names: teams.into_iter().map(|t| (t.team_id, t.name)).collect(),
            status: DraftStatus::Scheduled,
            current_pick: 1,
            deadline: None,
            pick_started_at: None,
            timer_generation: 0,
            picks: Vec::new(),
            auto_pick_queues: HashMap::new(),
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            config,
        };

        info!(
            "Created draft {} for league {}: {} teams, {} picks",
            draft_id,
            league_id,
            draft.team_count(),
            draft.total_picks()
        );
        self.inner.drafts.insert(draft_id, Arc::new(Mutex::new(draft)));
        Ok(draft_id)
    }

    /// `scheduled → active`; opens pick 1
    pub async fn start_draft(&self, draft_id: DraftId) -> Result<()> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        if draft.status != DraftStatus::Scheduled {
            return Err(DraftError::InvalidTransition { status: draft.status, action: "start" });
        }
        if draft.team_count() < 2 {
            return Err(DraftError::NotEnoughTeams { found: draft.team_count() });
        }

        let now = Utc::now();
        draft.status = DraftStatus::Active;
        draft.current_pick = 1;
        draft.started_at = Some(now);

        let first_team_id = draft.current_team().unwrap_or_default();
        self.publish(LeagueEvent::DraftStarted {
            league_id: draft.league_id,
            draft_id: draft_id.0,
            total_picks: draft.total_picks(),
            first_team_id,
            first_team_name: draft.team_name(first_team_id),
            timestamp: now,
        });
        self.open_pick(&mut draft);

        increment_counter!("drafts_started_total");
        info!("Draft {} started, team {} on the clock", draft_id, first_team_id);
        Ok(())
    }

    /// Record a human pick for the team on the clock
    pub async fn make_pick(
        &self,
        draft_id: DraftId,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<Pick> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        let player = match self.validate_pick(&draft, team_id, player_id).await {
            Ok(player) => player,
            Err(e) => {
                warn!("Pick rejected in draft {}: {}", draft_id, e);
                return Err(e);
            }
        };
        self.record_pick(&mut draft, team_id, player, false).await
    }

    /// `active → paused`; the current pick is kept and its timer cancelled
    pub async fn pause_draft(&self, draft_id: DraftId) -> Result<()> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        if draft.status != DraftStatus::Active {
            return Err(DraftError::InvalidTransition { status: draft.status, action: "pause" });
        }

        self.inner.timers.cancel(draft_id);
        draft.timer_generation += 1;
        draft.status = DraftStatus::Paused;
        draft.deadline = None;

        self.publish(LeagueEvent::DraftPaused {
            league_id: draft.league_id,
            draft_id: draft_id.0,
            pick_number: draft.current_pick,
            timestamp: Utc::now(),
        });
        info!("Draft {} paused at pick {}", draft_id, draft.current_pick);
        Ok(())
    }

    /// `paused → active` with a fresh deadline
    pub async fn resume_draft(&self, draft_id: DraftId) -> Result<()> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        if draft.status != DraftStatus::Paused {
            return Err(DraftError::InvalidTransition { status: draft.status, action: "resume" });
        }

        draft.status = DraftStatus::Active;
        let deadline = self.arm_pick(&mut draft);

        self.publish(LeagueEvent::DraftResumed {
            league_id: draft.league_id,
            draft_id: draft_id.0,
            pick_number: draft.current_pick,
            deadline,
            timestamp: Utc::now(),
        });
        self.publish_timer_started(&draft, deadline);
        info!("Draft {} resumed at pick {}", draft_id, draft.current_pick);
        Ok(())
    }

    /// Cancel a draft that is scheduled or paused
    pub async fn cancel_draft(&self, draft_id: DraftId) -> Result<()> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        if !matches!(draft.status, DraftStatus::Scheduled | DraftStatus::Paused) {
            return Err(DraftError::InvalidTransition { status: draft.status, action: "cancel" });
        }

        self.inner.timers.cancel(draft_id);
        draft.status = DraftStatus::Cancelled;
        draft.deadline = None;

        self.publish(LeagueEvent::DraftCancelled {
            league_id: draft.league_id,
            draft_id: draft_id.0,
            timestamp: Utc::now(),
        });
        info!("Draft {} cancelled", draft_id);
        Ok(())
    }

    /// Replace a team's ordered auto-pick preferences
    pub async fn set_auto_pick_queue(
        &self,
        draft_id: DraftId,
        team_id: TeamId,
        players: Vec<PlayerId>,
    ) -> Result<()> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        if draft.is_finished() {
            return Err(DraftError::InvalidTransition {
                status: draft.status,
                action: "set an auto-pick queue on",
            });
        }
        if !draft.base_order.contains(&team_id) {
            return Err(DraftError::TeamNotInDraft(team_id));
        }

        debug!("Team {} set {} queued players in draft {}", team_id, players.len(), draft_id);
        draft.auto_pick_queues.insert(team_id, players);
        Ok(())
    }

    pub async fn draft_status(&self, draft_id: DraftId) -> Result<DraftStatusView> {
        let handle = self.draft_handle(draft_id)?;
        let draft = handle.lock().await;
        Ok(DraftStatusView::from(&*draft))
    }

    /// Full snapshot of a draft, including every pick
    pub async fn get_draft(&self, draft_id: DraftId) -> Result<Draft> {
        let handle = self.draft_handle(draft_id)?;
        let draft = handle.lock().await;
        Ok(draft.clone())
    }

    pub async fn drafts_for_league(&self, league_id: LeagueId) -> Vec<DraftStatusView> {
        let handles: Vec<Arc<Mutex<Draft>>> =
            self.inner.drafts.iter().map(|entry| Arc::clone(entry.value())).collect();

        let mut views = Vec::new();
        for handle in handles {
            let draft = handle.lock().await;
            if draft.league_id == league_id {
                views.push(DraftStatusView::from(&*draft));
            }
        }
        views.sort_by_key(|v| v.started_at);
        views
    }

    /// Unrostered players in the draft's league, best-ranked first
    pub async fn available_players(
        &self,
        draft_id: DraftId,
        position: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PlayerRecord>> {
        let league_id = self.draft_handle(draft_id)?.lock().await.league_id;

        let mut players = self
            .bounded(list_available(
                self.inner.catalog.as_ref(),
                self.inner.store.as_ref(),
                league_id,
                position,
            ))
            .await?;
        self.inner.ranking.sort_best_first(&mut players);
        players.truncate(limit);
        Ok(players)
    }

    /// Run auto-pick for the current pick now, as if its deadline had passed
    pub async fn trigger_auto_pick(&self, draft_id: DraftId) -> Result<Pick> {
        info!("Manual auto-pick triggered for draft {}", draft_id);
        self.auto_pick_once(draft_id, None).await?.ok_or(DraftError::NoPlayerAvailable)
    }

    /// Mock draft over the league's teams and the full catalog
    pub async fn mock_draft(
        &self,
        league_id: LeagueId,
        config: Option<DraftConfig>,
        order: DraftOrder,
    ) -> Result<MockDraft> {
        let config = config.unwrap_or_else(|| DraftConfig {
            is_mock: true,
            ..self.inner.config.defaults.clone()
        });
        let teams = self.bounded(self.inner.store.list_teams(league_id)).await?;
        let players = self.bounded(self.inner.catalog.list_players(None)).await?;

        simulate_draft(
            &teams,
            &config,
            &order,
            players,
            self.inner.ranking.as_ref(),
            &self.inner.config.position_caps,
        )
    }

    pub fn active_timers(&self) -> usize {
        self.inner.timers.active_count()
    }

    /// Cancel every pick timer; drafts keep their state
    pub fn shutdown(&self) -> usize {
        let cancelled = self.inner.timers.cancel_all();
        info!("Draft engine shutdown: cancelled {} pick timers", cancelled);
        cancelled
    }

    fn draft_handle(&self, draft_id: DraftId) -> Result<Arc<Mutex<Draft>>> {
        self.inner
            .drafts
            .get(&draft_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(DraftError::DraftNotFound(draft_id))
    }

    fn publish(&self, event: LeagueEvent) {
        self.inner.sink.publish(event);
    }

    /// Bound a catalog or store call by the configured timeout
    async fn bounded<T, E>(&self, fut: impl Future<Output = std::result::Result<T, E>>) -> Result<T>
    where
        DraftError: From<E>,
    {
        let timeout_ms = self.inner.config.io_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
            Ok(result) => result.map_err(DraftError::from),
            Err(_) => Err(DraftError::Timeout(timeout_ms)),
        }
    }

    /// Checks run in order; the first failure is reported
    async fn validate_pick(
        &self,
        draft: &Draft,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<PlayerRecord> {
        if draft.status != DraftStatus::Active {
            return Err(PickRejection::DraftNotActive(draft.status).into());
        }

        let expected = draft.current_team().ok_or(PickRejection::DraftNotActive(draft.status))?;
        if expected != team_id {
            return Err(PickRejection::NotYourTurn { expected, actual: team_id }.into());
        }

        if draft.is_drafted(player_id) {
            return Err(PickRejection::PlayerAlreadyDrafted(player_id).into());
        }

        self.bounded(self.inner.catalog.get_player(player_id))
            .await?
            .ok_or_else(|| PickRejection::PlayerNotFound(player_id).into())
    }

    /// Roster the player, record the pick and advance
    async fn record_pick(
        &self,
        draft: &mut Draft,
        team_id: TeamId,
        player: PlayerRecord,
        is_auto_pick: bool,
    ) -> Result<Pick> {
        let add = self.inner.store.add_player(
            draft.league_id,
            team_id,
            player.player_id,
            RosterSlot::Bench,
        );
        match self.bounded(add).await {
            Ok(()) => {}
            Err(DraftError::Roster(RosterError::PlayerAlreadyRostered { .. })) => {
                return Err(PickRejection::PlayerUnavailable(player.player_id).into());
            }
            Err(DraftError::Roster(RosterError::RosterFull { .. })) => {
                return Err(PickRejection::RosterFull(team_id).into());
            }
            Err(e) => return Err(e),
        }

        let now = Utc::now();
        let pick = Pick {
            pick_number: draft.current_pick,
            round: draft.round_for_pick(draft.current_pick),
            team_id,
            player_id: player.player_id,
            timestamp: now,
            elapsed_secs: draft.pick_started_at.map(|s| (now - s).num_seconds()).unwrap_or(0),
            is_auto_pick,
        };
        draft.picks.push(pick.clone());
        draft.current_pick += 1;
        self.inner.timers.cancel(draft.draft_id);

        let event = PickEvent {
            league_id: draft.league_id,
            draft_id: draft.draft_id.0,
            pick_number: pick.pick_number,
            round: pick.round,
            team_id,
            team_name: draft.team_name(team_id),
            player_id: player.player_id,
            player_name: player.name.clone(),
            position: player.position.clone(),
            is_auto_pick,
            elapsed_secs: pick.elapsed_secs,
            timestamp: now,
        };
        if is_auto_pick {
            increment_counter!("draft_auto_picks_total");
            self.publish(LeagueEvent::AutoPickMade(event));
        } else {
            self.publish(LeagueEvent::PickMade(event));
        }
        increment_counter!("draft_picks_total");

        info!(
            "Draft {} pick {} (round {}): team {} selected {}{}",
            draft.draft_id,
            pick.pick_number,
            pick.round,
            team_id,
            player.label(),
            if is_auto_pick { " [auto]" } else { "" }
        );

        if draft.current_pick > draft.total_picks() {
            self.complete(draft);
        } else {
            let deadline = self.arm_pick(draft);
            self.publish_timer_started(draft, deadline);
        }

        Ok(pick)
    }

    fn complete(&self, draft: &mut Draft) {
        let now = Utc::now();
        draft.status = DraftStatus::Completed;
        draft.completed_at = Some(now);
        draft.deadline = None;
        self.inner.timers.cancel(draft.draft_id);

        self.publish(LeagueEvent::DraftCompleted {
            league_id: draft.league_id,
            draft_id: draft.draft_id.0,
            total_picks: draft.total_picks(),
            timestamp: now,
        });
        increment_counter!("drafts_completed_total");
        info!("Draft {} completed with {} picks", draft.draft_id, draft.picks.len());
    }

    /// Open the current pick and arm its timer
    fn open_pick(&self, draft: &mut Draft) {
        let deadline = self.arm_pick(draft);
        self.publish_timer_started(draft, deadline);
    }

    fn arm_pick(&self, draft: &mut Draft) -> DateTime<Utc> {
        let now = Utc::now();
        let duration = draft.config.pick_duration_secs;
        let deadline = now + chrono::Duration::seconds(duration as i64);

        draft.deadline = Some(deadline);
        draft.pick_started_at = Some(now);

        draft.timer_generation += 1;
        let delay = Duration::from_secs(duration + draft.config.auto_pick_threshold_secs);
        self.arm_timer(draft.draft_id, draft.current_pick, draft.timer_generation, delay);
        deadline
    }

    fn publish_timer_started(&self, draft: &Draft, deadline: DateTime<Utc>) {
        if let Some(team_id) = draft.current_team() {
            self.publish(LeagueEvent::PickTimerStarted {
                league_id: draft.league_id,
                draft_id: draft.draft_id.0,
                pick_number: draft.current_pick,
                team_id,
                team_name: draft.team_name(team_id),
                deadline,
            });
        }
    }

    fn arm_timer(&self, draft_id: DraftId, pick_number: u32, generation: u64, delay: Duration) {
        let engine = Arc::downgrade(&self.inner);
        self.inner.timers.arm(draft_id, pick_number, delay, async move {
            if let Some(inner) = engine.upgrade() {
                let token = DeadlineToken { pick_number, generation };
                DraftEngine { inner }.on_deadline(draft_id, token).await;
            }
        });
    }

    /// Timer expiry for the pick named by `token`
    async fn on_deadline(&self, draft_id: DraftId, token: DeadlineToken) {
        self.inner.timers.release(draft_id, token.pick_number);
        debug!("Deadline passed for draft {} pick {}", draft_id, token.pick_number);

        let result = run_with_retry(
            move || self.auto_pick_once(draft_id, Some(token)),
            &self.inner.config.retry,
            DraftError::is_transient,
        )
        .await;

        if let Err(e) = result {
            self.raise_alert(draft_id, &e).await;
        }
    }

    /// One auto-pick attempt
    ///
    /// With a deadline token the attempt is a no-op unless that pick is still open under the
    /// same timer, so a stale timer, or a retry racing a human pick or a pause, does nothing.
    async fn auto_pick_once(
        &self,
        draft_id: DraftId,
        expected: Option<DeadlineToken>,
    ) -> Result<Option<Pick>> {
        let handle = self.draft_handle(draft_id)?;
        let mut draft = handle.lock().await;

        match expected {
            Some(DeadlineToken { pick_number, generation }) => {
                if draft.status != DraftStatus::Active
                    || draft.current_pick != pick_number
                    || draft.timer_generation != generation
                {
                    debug!("Ignoring stale deadline for draft {} pick {}", draft_id, pick_number);
                    return Ok(None);
                }
                if !draft.config.auto_pick_enabled {
                    info!(
                        "Draft {} pick {} expired with auto-pick disabled, awaiting manual pick",
                        draft_id, pick_number
                    );
                    return Ok(None);
                }
            }
            None if draft.status != DraftStatus::Active => {
                return Err(PickRejection::DraftNotActive(draft.status).into());
            }
            None => {}
        }

        let team_id = draft.current_team().ok_or(DraftError::NoPlayerAvailable)?;
        let choice = self.choose_auto_pick(&draft, team_id).await?;
        let player = self.validate_pick(&draft, team_id, choice.player_id).await?;
        let pick = self.record_pick(&mut draft, team_id, player, true).await?;
        Ok(Some(pick))
    }

    async fn choose_auto_pick(&self, draft: &Draft, team_id: TeamId) -> Result<PlayerRecord> {
        let catalog = self.bounded(self.inner.catalog.list_players(None)).await?;
        let rostered = self.bounded(self.inner.store.rostered_players(draft.league_id)).await?;
        let roster = self.bounded(self.inner.store.get_roster(draft.league_id, team_id)).await?;

        let by_id: HashMap<PlayerId, &PlayerRecord> =
            catalog.iter().map(|p| (p.player_id, p)).collect();
        let counts =
            position_counts(roster.players.iter().filter_map(|e| by_id.get(&e.player_id).copied()));

        let drafted: HashSet<PlayerId> = draft.picks.iter().map(|p| p.player_id).collect();
        let mut available: Vec<PlayerRecord> = catalog
            .iter()
            .filter(|p| !rostered.contains(&p.player_id) && !drafted.contains(&p.player_id))
            .cloned()
            .collect();
        self.inner.ranking.sort_best_first(&mut available);

        let queue = draft.auto_pick_queues.get(&team_id).map(Vec::as_slice).unwrap_or(&[]);
        select_auto_pick(queue, &available, &counts, &self.inner.config.position_caps)
            .cloned()
            .ok_or(DraftError::NoPlayerAvailable)
    }

    /// Auto-pick could not complete; leave the draft waiting for an operator
    async fn raise_alert(&self, draft_id: DraftId, err: &DraftError) {
        let (league_id, pick_number) = match self.draft_handle(draft_id) {
            Ok(handle) => {
                let draft = handle.lock().await;
                (draft.league_id, draft.current_pick)
            }
            Err(_) => return,
        };

        let severity = match err {
            DraftError::NoPlayerAvailable => AlertSeverity::Critical,
            _ => AlertSeverity::Warning,
        };
        error!("Auto-pick failed for draft {} pick {}: {}", draft_id, pick_number, err);
        increment_counter!("draft_alerts_total");

        self.publish(LeagueEvent::LeagueAlert {
            league_id,
            draft_id: Some(draft_id.0),
            severity,
            message: format!("Auto-pick failed at pick {pick_number}: {err}"),
            timestamp: Utc::now(),
        });
    }
}
