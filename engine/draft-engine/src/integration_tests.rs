//! Draft engine tests against the in-memory roster store

use async_trait::async_trait;
use league_events::{AlertSeverity, LeagueEvent, MemorySink};
use player_registry::{PlayerId, PlayerRecord, PlayerRegistry};
use roster_store::{
    InMemoryRosterStore, LeagueId, RetryConfig, Roster, RosterError, RosterSlot, RosterStore,
    RosterTransaction, TeamId, TeamInfo, TeamWaiverState,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::auto_pick::PositionCaps;
use crate::config::{DraftConfig, DraftEngineConfig};
use crate::engine::DraftEngine;
use crate::error::{DraftError, PickRejection};
use crate::order::DraftOrder;
use crate::types::{DraftId, DraftStatus};

const LEAGUE: LeagueId = 1;

/// Roster store whose `rostered_players` fails while failures remain
struct FlakyStore {
    inner: InMemoryRosterStore,
    failures: AtomicU32,
}

#[async_trait]
impl RosterStore for FlakyStore {
    async fn list_teams(&self, league_id: LeagueId) -> roster_store::Result<Vec<TeamInfo>> {
        self.inner.list_teams(league_id).await
    }

    async fn get_roster(&self, league_id: LeagueId, team_id: TeamId) -> roster_store::Result<Roster> {
        self.inner.get_roster(league_id, team_id).await
    }

    async fn add_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
        slot: RosterSlot,
    ) -> roster_store::Result<()> {
        self.inner.add_player(league_id, team_id, player_id, slot).await
    }

    async fn remove_player(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> roster_store::Result<()> {
        self.inner.remove_player(league_id, team_id, player_id).await
    }

    async fn owner_of(
        &self,
        league_id: LeagueId,
        player_id: PlayerId,
    ) -> roster_store::Result<Option<TeamId>> {
        self.inner.owner_of(league_id, player_id).await
    }

    async fn rostered_players(&self, league_id: LeagueId) -> roster_store::Result<HashSet<PlayerId>> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(RosterError::Unavailable("connection reset".to_string()));
        }
        self.inner.rostered_players(league_id).await
    }

    async fn waiver_state(
        &self,
        league_id: LeagueId,
        team_id: TeamId,
    ) -> roster_store::Result<TeamWaiverState> {
        self.inner.waiver_state(league_id, team_id).await
    }

    async fn commit(&self, transaction: RosterTransaction) -> roster_store::Result<()> {
        self.inner.commit(transaction).await
    }
}

struct Harness {
    engine: DraftEngine,
    store: Arc<dyn RosterStore>,
    sink: MemorySink,
}

fn create_test_players() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord::new(1, "Josh Allen", "QB", "BUF", 380.0),
        PlayerRecord::new(2, "Bijan Robinson", "RB", "ATL", 330.0),
        PlayerRecord::new(3, "CeeDee Lamb", "WR", "DAL", 310.0),
        PlayerRecord::new(4, "Lamar Jackson", "QB", "BAL", 300.0),
        PlayerRecord::new(5, "Breece Hall", "RB", "NYJ", 280.0),
        PlayerRecord::new(6, "Travis Kelce", "TE", "KC", 240.0),
        PlayerRecord::new(7, "Puka Nacua", "WR", "LAR", 230.0),
        PlayerRecord::new(8, "Justin Tucker", "K", "BAL", 150.0),
        PlayerRecord::new(9, "49ers", "DEF", "SF", 140.0),
        PlayerRecord::new(10, "Jalen Hurts", "QB", "PHI", 120.0),
    ]
}

fn create_test_config() -> DraftEngineConfig {
    DraftEngineConfig {
        defaults: DraftConfig {
            rounds: 2,
            pick_duration_secs: 60,
            auto_pick_threshold_secs: 0,
            ..Default::default()
        },
        position_caps: PositionCaps::default(),
        io_timeout_ms: 2_000,
        retry: RetryConfig {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 1_000,
            backoff_multiplier: 2.0,
        },
    }
}

async fn create_memory_store(team_count: u32) -> InMemoryRosterStore {
    let store = InMemoryRosterStore::new();
    for team_id in 1..=team_count {
        store
            .register_team(LEAGUE, TeamInfo::new(team_id, format!("Team {team_id}"), 15))
            .await
            .unwrap();
    }
    store
}

async fn create_test_harness(team_count: u32, config: DraftEngineConfig) -> Harness {
    let store: Arc<dyn RosterStore> = Arc::new(create_memory_store(team_count).await);
    create_harness_with(store, create_test_players(), config)
}

fn create_harness_with(
    store: Arc<dyn RosterStore>,
    players: Vec<PlayerRecord>,
    config: DraftEngineConfig,
) -> Harness {
    let sink = MemorySink::new();
    let engine = DraftEngine::new(
        config,
        Arc::new(PlayerRegistry::from_records(players)),
        Arc::clone(&store),
        Arc::new(sink.clone()),
    );
    Harness { engine, store, sink }
}

async fn create_started_draft(harness: &Harness, order: Vec<TeamId>) -> DraftId {
    let draft_id = harness
        .engine
        .create_draft(LEAGUE, None, DraftOrder::Custom(order))
        .await
        .unwrap();
    harness.engine.start_draft(draft_id).await.unwrap();
    draft_id
}

/// Let spawned timer tasks run to completion
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_full_snake_draft_completes() {
    let harness = create_test_harness(3, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2, 3]).await;

    let script = [(1, 1), (2, 2), (3, 3), (3, 4), (2, 5), (1, 6)];
    for (index, (team_id, player_id)) in script.into_iter().enumerate() {
        let before = harness.engine.draft_status(draft_id).await.unwrap().current_pick;
        let pick = harness.engine.make_pick(draft_id, team_id, player_id).await.unwrap();
        let after = harness.engine.draft_status(draft_id).await.unwrap().current_pick;

        assert_eq!(pick.pick_number, index as u32 + 1);
        assert_eq!(after, before + 1);
        assert!(!pick.is_auto_pick);
    }

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.status, DraftStatus::Completed);
    assert_eq!(status.current_pick, 7);
    assert!(status.completed_at.is_some());
    assert_eq!(harness.engine.active_timers(), 0);

    assert_eq!(harness.store.owner_of(LEAGUE, 4).await.unwrap(), Some(3));
    assert_eq!(harness.sink.count("draft_started"), 1);
    assert_eq!(harness.sink.count("pick_made"), 6);
    assert_eq!(harness.sink.count("draft_completed"), 1);
    assert_eq!(harness.sink.count("pick_timer_started"), 6);
}

#[tokio::test]
async fn test_pick_validation_order() {
    let harness = create_test_harness(3, create_test_config()).await;
    let draft_id = harness
        .engine
        .create_draft(LEAGUE, None, DraftOrder::Custom(vec![1, 2, 3]))
        .await
        .unwrap();

    // Not active beats every other check
    let err = harness.engine.make_pick(draft_id, 2, 999).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::DraftNotActive(DraftStatus::Scheduled)));

    harness.engine.start_draft(draft_id).await.unwrap();
    let err = harness.engine.make_pick(draft_id, 2, 1).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::NotYourTurn { expected: 1, actual: 2 }));

    harness.engine.make_pick(draft_id, 1, 1).await.unwrap();

    let err = harness.engine.make_pick(draft_id, 3, 1).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::NotYourTurn { expected: 2, actual: 3 }));

    let err = harness.engine.make_pick(draft_id, 2, 1).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::PlayerAlreadyDrafted(1)));

    let err = harness.engine.make_pick(draft_id, 2, 999).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::PlayerNotFound(999)));

    // Rejections leave the draft untouched
    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.current_pick, 2);
    assert_eq!(draft.picks.len(), 1);
}

#[tokio::test]
async fn test_player_rostered_outside_draft_is_unavailable() {
    let harness = create_test_harness(2, create_test_config()).await;
    harness.store.add_player(LEAGUE, 2, 1, RosterSlot::Starter).await.unwrap();
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    let err = harness.engine.make_pick(draft_id, 1, 1).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::PlayerUnavailable(1)));
    assert_eq!(harness.engine.draft_status(draft_id).await.unwrap().current_pick, 1);
}

#[tokio::test]
async fn test_pause_resume_and_cancel() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;
    assert_eq!(harness.engine.active_timers(), 1);

    harness.engine.pause_draft(draft_id).await.unwrap();
    assert_eq!(harness.engine.active_timers(), 0);
    assert!(harness.engine.draft_status(draft_id).await.unwrap().deadline.is_none());

    let err = harness.engine.make_pick(draft_id, 1, 1).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::DraftNotActive(DraftStatus::Paused)));

    harness.engine.resume_draft(draft_id).await.unwrap();
    assert_eq!(harness.engine.active_timers(), 1);
    assert!(harness.engine.draft_status(draft_id).await.unwrap().deadline.is_some());

    let err = harness.engine.cancel_draft(draft_id).await.unwrap_err();
    assert!(matches!(err, DraftError::InvalidTransition { status: DraftStatus::Active, .. }));

    harness.engine.pause_draft(draft_id).await.unwrap();
    harness.engine.cancel_draft(draft_id).await.unwrap();

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.status, DraftStatus::Cancelled);
    assert_eq!(status.current_pick, 1);
    assert_eq!(
        harness.sink.event_types(),
        vec![
            "draft_started",
            "pick_timer_started",
            "draft_paused",
            "draft_resumed",
            "pick_timer_started",
            "draft_paused",
            "draft_cancelled",
        ]
    );
}

#[tokio::test]
async fn test_start_requires_two_teams() {
    let harness = create_test_harness(1, create_test_config()).await;
    let draft_id = harness
        .engine
        .create_draft(LEAGUE, None, DraftOrder::default())
        .await
        .unwrap();

    let err = harness.engine.start_draft(draft_id).await.unwrap_err();
    assert!(matches!(err, DraftError::NotEnoughTeams { found: 1 }));
    assert_eq!(harness.engine.draft_status(draft_id).await.unwrap().status, DraftStatus::Scheduled);
    assert!(harness.sink.events().is_empty());
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let harness = create_test_harness(2, create_test_config()).await;
    let config = DraftConfig { rounds: 0, ..Default::default() };

    let err = harness
        .engine
        .create_draft(LEAGUE, Some(config), DraftOrder::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DraftError::InvalidConfig(_)));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_auto_pick_uses_queue() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = harness
        .engine
        .create_draft(LEAGUE, None, DraftOrder::Custom(vec![1, 2]))
        .await
        .unwrap();
    harness.engine.set_auto_pick_queue(draft_id, 1, vec![7, 3]).await.unwrap();
    harness.engine.start_draft(draft_id).await.unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;

    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks.len(), 1);
    assert_eq!(draft.picks[0].player_id, 7);
    assert!(draft.picks[0].is_auto_pick);
    assert_eq!(draft.current_pick, 2);
    assert_eq!(harness.sink.count("auto_pick_made"), 1);
    assert_eq!(harness.engine.active_timers(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drafted_queue_falls_back_to_best_available() {
    let mut config = create_test_config();
    // Every position is capped, so the positional filter empties the pool
    config.position_caps = PositionCaps { caps: HashMap::new(), unlisted: 0 };
    let harness = create_test_harness(2, config).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    harness.engine.set_auto_pick_queue(draft_id, 2, vec![1]).await.unwrap();
    harness.engine.make_pick(draft_id, 1, 1).await.unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;

    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks.len(), 2);
    assert_eq!(draft.picks[1].team_id, 2);
    assert_eq!(draft.picks[1].player_id, 2);
    assert!(draft.picks[1].is_auto_pick);
}

#[tokio::test(start_paused = true)]
async fn test_auto_pick_respects_position_caps() {
    let mut config = create_test_config();
    config.position_caps = PositionCaps {
        caps: HashMap::from([("QB".to_string(), 1), ("RB".to_string(), 2)]),
        unlisted: 1,
    };
    let harness = create_test_harness(2, config).await;
    harness.store.add_player(LEAGUE, 1, 10, RosterSlot::Starter).await.unwrap();
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;

    // Team 1 already holds a QB, so the top QB is skipped
    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks[0].player_id, 2);
}

#[tokio::test(start_paused = true)]
async fn test_auto_pick_disabled_waits_for_manual_pick() {
    let mut config = create_test_config();
    config.defaults.auto_pick_enabled = false;
    let harness = create_test_harness(2, config).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    tokio::time::sleep(Duration::from_secs(200)).await;
    settle().await;

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.status, DraftStatus::Active);
    assert_eq!(status.current_pick, 1);
    assert_eq!(status.picks_made, 0);
    assert_eq!(harness.engine.active_timers(), 0);

    harness.engine.make_pick(draft_id, 1, 3).await.unwrap();
    assert_eq!(harness.engine.draft_status(draft_id).await.unwrap().current_pick, 2);
}

#[tokio::test(start_paused = true)]
async fn test_no_player_available_raises_alert() {
    let store: Arc<dyn RosterStore> = Arc::new(create_memory_store(2).await);
    let harness = create_harness_with(
        store,
        vec![PlayerRecord::new(1, "Josh Allen", "QB", "BUF", 380.0)],
        create_test_config(),
    );
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;
    harness.engine.make_pick(draft_id, 1, 1).await.unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.status, DraftStatus::Active);
    assert_eq!(status.current_pick, 2);

    let alerts: Vec<LeagueEvent> = harness
        .sink
        .events()
        .into_iter()
        .filter(|e| e.event_type() == "league_alert")
        .collect();
    assert_eq!(alerts.len(), 1);
    assert!(matches!(
        alerts[0],
        LeagueEvent::LeagueAlert { severity: AlertSeverity::Critical, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_is_retried() {
    let store: Arc<dyn RosterStore> = Arc::new(FlakyStore {
        inner: create_memory_store(2).await,
        failures: AtomicU32::new(2),
    });
    let harness = create_harness_with(store, create_test_players(), create_test_config());
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    tokio::time::sleep(Duration::from_secs(65)).await;
    settle().await;

    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks.len(), 1);
    assert_eq!(draft.picks[0].player_id, 1);
    assert_eq!(harness.sink.count("league_alert"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_persistent_failure_alerts_without_advancing() {
    let store: Arc<dyn RosterStore> = Arc::new(FlakyStore {
        inner: create_memory_store(2).await,
        failures: AtomicU32::new(100),
    });
    let harness = create_harness_with(store, create_test_players(), create_test_config());
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    tokio::time::sleep(Duration::from_secs(65)).await;
    settle().await;

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.status, DraftStatus::Active);
    assert_eq!(status.current_pick, 1);
    assert_eq!(harness.sink.count("league_alert"), 1);
    assert!(matches!(
        harness.sink.events().last(),
        Some(LeagueEvent::LeagueAlert { severity: AlertSeverity::Warning, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_pause_during_retry_backoff_keeps_resumed_deadline() {
    let store: Arc<dyn RosterStore> = Arc::new(FlakyStore {
        inner: create_memory_store(2).await,
        failures: AtomicU32::new(1),
    });
    let harness = create_harness_with(store, create_test_players(), create_test_config());
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    // First auto-pick attempt has failed; its retry is waiting out the backoff
    tokio::time::sleep(Duration::from_millis(60_050)).await;
    settle().await;

    harness.engine.pause_draft(draft_id).await.unwrap();
    harness.engine.resume_draft(draft_id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    settle().await;
    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert!(draft.picks.is_empty());
    assert_eq!(draft.current_pick, 1);

    // The fresh deadline still auto-picks
    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;
    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks.len(), 1);
    assert!(draft.picks[0].is_auto_pick);
    assert_eq!(harness.sink.count("league_alert"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_ignored_after_manual_pick() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    tokio::time::sleep(Duration::from_secs(30)).await;
    harness.engine.make_pick(draft_id, 1, 1).await.unwrap();

    // Past the first pick's deadline but inside the second's
    tokio::time::sleep(Duration::from_secs(40)).await;
    settle().await;

    let draft = harness.engine.get_draft(draft_id).await.unwrap();
    assert_eq!(draft.picks.len(), 1);
    assert_eq!(harness.sink.count("auto_pick_made"), 0);
}

#[tokio::test]
async fn test_draft_status_recent_picks() {
    let mut config = create_test_config();
    config.defaults.rounds = 3;
    let harness = create_test_harness(3, config).await;
    let draft_id = create_started_draft(&harness, vec![1, 2, 3]).await;

    let script = [(1, 1), (2, 2), (3, 3), (3, 4), (2, 5), (1, 6), (1, 7)];
    for (team_id, player_id) in script {
        harness.engine.make_pick(draft_id, team_id, player_id).await.unwrap();
    }

    let status = harness.engine.draft_status(draft_id).await.unwrap();
    assert_eq!(status.picks_made, 7);
    assert_eq!(status.total_picks, 9);
    assert_eq!(status.current_round, 3);
    assert_eq!(status.current_team_id, Some(2));
    assert_eq!(status.recent_picks.len(), 5);
    assert_eq!(status.recent_picks.first().map(|p| p.pick_number), Some(3));
    assert_eq!(status.recent_picks.last().map(|p| p.pick_number), Some(7));
}

#[tokio::test]
async fn test_available_players_excludes_rostered() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;
    harness.engine.make_pick(draft_id, 1, 1).await.unwrap();
    harness.engine.make_pick(draft_id, 2, 3).await.unwrap();

    let players = harness.engine.available_players(draft_id, None, 3).await.unwrap();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.player_id).collect();
    assert_eq!(ids, vec![2, 4, 5]);

    let qbs = harness.engine.available_players(draft_id, Some("QB"), 10).await.unwrap();
    let ids: Vec<PlayerId> = qbs.iter().map(|p| p.player_id).collect();
    assert_eq!(ids, vec![4, 10]);
}

#[tokio::test]
async fn test_concurrent_picks_single_winner() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    let first = {
        let engine = harness.engine.clone();
        tokio::spawn(async move { engine.make_pick(draft_id, 1, 1).await })
    };
    let second = {
        let engine = harness.engine.clone();
        tokio::spawn(async move { engine.make_pick(draft_id, 1, 2).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(loser.rejection(), Some(&PickRejection::NotYourTurn { expected: 2, actual: 1 }));
    assert_eq!(harness.engine.draft_status(draft_id).await.unwrap().picks_made, 1);
}

#[tokio::test]
async fn test_trigger_auto_pick() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = harness
        .engine
        .create_draft(LEAGUE, None, DraftOrder::Custom(vec![2, 1]))
        .await
        .unwrap();

    let err = harness.engine.trigger_auto_pick(draft_id).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&PickRejection::DraftNotActive(DraftStatus::Scheduled)));

    harness.engine.start_draft(draft_id).await.unwrap();
    let pick = harness.engine.trigger_auto_pick(draft_id).await.unwrap();
    assert_eq!(pick.team_id, 2);
    assert_eq!(pick.player_id, 1);
    assert!(pick.is_auto_pick);
}

#[tokio::test]
async fn test_set_queue_for_unknown_team() {
    let harness = create_test_harness(2, create_test_config()).await;
    let draft_id = create_started_draft(&harness, vec![1, 2]).await;

    let err = harness.engine.set_auto_pick_queue(draft_id, 9, vec![1]).await.unwrap_err();
    assert!(matches!(err, DraftError::TeamNotInDraft(9)));

    let err = harness.engine.start_draft(DraftId::new()).await.unwrap_err();
    assert!(matches!(err, DraftError::DraftNotFound(_)));
}

#[tokio::test]
async fn test_shutdown_cancels_timers() {
    let harness = create_test_harness(2, create_test_config()).await;
    create_started_draft(&harness, vec![1, 2]).await;
    create_started_draft(&harness, vec![2, 1]).await;
    assert_eq!(harness.engine.active_timers(), 2);

    assert_eq!(harness.engine.shutdown(), 2);
    assert_eq!(harness.engine.active_timers(), 0);
    assert_eq!(harness.engine.drafts_for_league(LEAGUE).await.len(), 2);
}

#[tokio::test]
async fn test_mock_draft_leaves_rosters_untouched() {
    let harness = create_test_harness(2, create_test_config()).await;

    let result = harness
        .engine
        .mock_draft(LEAGUE, None, DraftOrder::Random { seed: Some(11) })
        .await
        .unwrap();

    assert_eq!(result.picks.len(), 4);
    assert!(harness.store.rostered_players(LEAGUE).await.unwrap().is_empty());
    assert!(harness.sink.events().is_empty());
}
