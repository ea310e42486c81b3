//! Service state management and component initialization

use anyhow::{Context, Result};
use draft_engine::DraftEngine;
use league_events::{BroadcastSink, EventSink, FanoutSink, LeagueEvent, LogSink};
use player_registry::{PlayerCatalog, PlayerRegistry};
use roster_store::{InMemoryRosterStore, RosterStore, TeamInfo};
use metrics::gauge;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use waiver_engine::{PriorityPolicyKind, WaiverEngine, WaiverScheduler};

use crate::config::ServiceConfig;

/// Service state containing all initialized components
pub struct ServiceState {
    /// Service configuration
    pub config: ServiceConfig,

    pub catalog: Arc<PlayerRegistry>,

    /// Sole owner of roster ownership for every league
    pub store: Arc<InMemoryRosterStore>,

    /// Event stream handed to downstream notification consumers
    pub events: Arc<BroadcastSink>,

    pub draft: DraftEngine,
    pub waiver: WaiverEngine,

    shutdown_tx: watch::Sender<bool>,
    is_running: AtomicBool,
}

impl ServiceState {
    /// Create a new service state with all components initialized
    pub async fn new(config: ServiceConfig) -> Result<Self> {
        info!("Initializing service components...");

        // Player catalog first; both engines validate against it
        let mut registry = PlayerRegistry::new();
        match &config.catalog.path {
            Some(path) => {
                registry
                    .load_from_file(path)
                    .await
                    .with_context(|| format!("Failed to load player catalog from {:?}", path))?;
            }
            None => warn!("No player catalog configured, starting with an empty catalog"),
        }
        let catalog = Arc::new(registry);

        info!("Registering {} leagues...", config.leagues.len());
        let store = Arc::new(InMemoryRosterStore::new());
        for seed in &config.leagues {
            let capacity = seed.roster_capacity.unwrap_or(config.roster.default_capacity);
            let teams = seed
                .teams
                .iter()
                .map(|team| TeamInfo::new(team.team_id, team.name.clone(), capacity))
                .collect();
            store
                .register_league(seed.league_id, teams)
                .await
                .with_context(|| format!("Failed to register league {}", seed.league_id))?;
        }

        let events = Arc::new(BroadcastSink::new(config.service.event_buffer));
        let sink: Arc<dyn EventSink> = Arc::new(
            FanoutSink::new().with_sink(events.clone()).with_sink(Arc::new(LogSink)),
        );

        let catalog_dyn: Arc<dyn PlayerCatalog> = catalog.clone();
        let store_dyn: Arc<dyn RosterStore> = store.clone();

        info!("Initializing DraftEngine...");
        let draft = DraftEngine::new(
            config.draft.clone(),
            catalog_dyn.clone(),
            store_dyn.clone(),
            sink.clone(),
        );

        info!("Initializing WaiverEngine...");
        let waiver = WaiverEngine::new(config.waiver.clone(), catalog_dyn, store_dyn, sink);
        for seed in &config.leagues {
            let order = waiver
                .initialize_league(seed.league_id, seed.waiver_order.clone())
                .await
                .with_context(|| {
                    format!("Failed to initialize waivers for league {}", seed.league_id)
                })?;
            info!("League {} waiver order: {:?}", seed.league_id, order);

            if config.waiver.policy == PriorityPolicyKind::ReverseStandings {
                let standings = seed.standings.clone().with_context(|| {
                    format!("League {} has no standings for reverse_standings", seed.league_id)
                })?;
                waiver.update_standings(seed.league_id, standings).with_context(|| {
                    format!("Failed to seed standings for league {}", seed.league_id)
                })?;
            }
        }

        gauge!("league_service_leagues", config.leagues.len() as f64);
        gauge!("league_service_catalog_players", catalog.len() as f64);

        let (shutdown_tx, _) = watch::channel(false);

        info!("All service components initialized successfully");
        Ok(Self {
            config,
            catalog,
            store,
            events,
            draft,
            waiver,
            shutdown_tx,
            is_running: AtomicBool::new(true),
        })
    }

    /// Spawn the weekly waiver scheduler, unless disabled in config
    pub fn start_waiver_scheduler(&self) -> Result<Option<JoinHandle<()>>> {
        if !self.config.waiver.schedule.enabled {
            info!("Waiver scheduler disabled");
            return Ok(None);
        }

        let scheduler = WaiverScheduler::new(self.waiver.clone())
            .context("Failed to build waiver scheduler")?;
        info!(
            "Starting waiver scheduler ({} {} UTC)",
            self.config.waiver.schedule.weekday, self.config.waiver.schedule.time
        );
        Ok(Some(scheduler.spawn(self.shutdown_tx.subscribe())))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LeagueEvent> {
        self.events.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Get service health status
    pub fn health_check(&self) -> ServiceHealth {
        if !self.is_running() {
            ServiceHealth::Unhealthy
        } else if self.catalog.is_empty() {
            ServiceHealth::Degraded
        } else {
            ServiceHealth::Healthy
        }
    }

    /// Stop the scheduler and cancel pick timers; returns the number of timers cancelled
    pub fn shutdown(&self) -> usize {
        info!("Initiating graceful shutdown...");
        self.is_running.store(false, Ordering::SeqCst);
        self.shutdown_tx.send_replace(true);
        self.draft.shutdown()
    }
}

/// Install the Prometheus exporter on all interfaces
pub fn install_metrics_exporter(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Service health status
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceHealth {
    Healthy,
    Unhealthy,
    /// Running without a player catalog
    Degraded,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceHealth::Healthy)
    }
}
