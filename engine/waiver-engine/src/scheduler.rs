//! Weekly waiver cutoff scheduler

use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveTime, Utc, Weekday};
use futures::future::join_all;
use roster_store::{run_with_retry, LeagueId};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};

use crate::engine::WaiverEngine;
use crate::error::WaiverError;
use crate::types::ResolutionSummary;
use crate::Result;

/// Next occurrence of `weekday` at `time` strictly after `now`
pub fn next_cutoff(now: DateTime<Utc>, weekday: Weekday, time: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive();
    let days_ahead =
        (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let candidate = (today + ChronoDuration::days(days_ahead as i64)).and_time(time).and_utc();

    if candidate > now {
        candidate
    } else {
        candidate + ChronoDuration::days(7)
    }
}

/// Runs a resolution pass over every known league at each weekly cutoff
pub struct WaiverScheduler {
    engine: WaiverEngine,
    weekday: Weekday,
    cutoff: NaiveTime,
}

impl WaiverScheduler {
    /// Build from the engine's schedule settings
    pub fn new(engine: WaiverEngine) -> Result<Self> {
        let schedule = &engine.config().schedule;
        let weekday = schedule.parsed_weekday().map_err(WaiverError::InvalidConfig)?;
        let cutoff = schedule.parsed_time().map_err(WaiverError::InvalidConfig)?;
        Ok(Self { engine, weekday, cutoff })
    }

    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        next_cutoff(now, self.weekday, self.cutoff)
    }

    /// Resolve every league once; transient failures are retried per league
    pub async fn run_cycle(&self) -> Vec<(LeagueId, Result<ResolutionSummary>)> {
        let leagues = self.engine.league_ids();
        let retry = &self.engine.config().retry;

        join_all(leagues.into_iter().map(|league_id| async move {
            let result = run_with_retry(
                || self.engine.resolve(league_id),
                retry,
                WaiverError::is_transient,
            )
            .await;
            (league_id, result)
        }))
        .await
    }

    /// Loop until `shutdown` flips to true
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            let now = Utc::now();
            let next = self.next_run_after(now);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            info!("Next waiver cutoff at {} (in {:?})", next, wait);

            tokio::select! {
                _ = sleep(wait) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Waiver scheduler stopping");
                        return;
                    }
                    continue;
                }
            }

            for (league_id, result) in self.run_cycle().await {
                match result {
                    Ok(summary) if summary.is_noop() => {}
                    Ok(summary) => info!(
                        "Waiver cycle for league {}: {} successful, {} failed",
                        league_id, summary.successful, summary.failed
                    ),
                    Err(e) => error!("Waiver cycle for league {} failed: {}", league_id, e),
                }
            }
        }
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
