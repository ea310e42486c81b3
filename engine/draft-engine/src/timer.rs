//! Per-draft pick timers

use dashmap::DashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::types::DraftId;

struct ArmedTimer {
    pick_number: u32,
    handle: JoinHandle<()>,
}

/// At most one armed timer per draft
///
/// Arming replaces (and aborts) any timer already held for the draft. A firing timer removes
/// its own entry before running its expiry work, so that work can arm the next timer safely.
#[derive(Default)]
pub(crate) struct PickTimers {
    timers: DashMap<DraftId, ArmedTimer>,
}

impl PickTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn arm<F>(&self, draft_id: DraftId, pick_number: u32, delay: Duration, on_expiry: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expiry.await;
        });

        if let Some(previous) = self.timers.insert(draft_id, ArmedTimer { pick_number, handle }) {
            previous.handle.abort();
        }
        debug!("Armed timer for draft {} pick {} ({:?})", draft_id, pick_number, delay);
    }

    pub(crate) fn cancel(&self, draft_id: DraftId) {
        if let Some((_, timer)) = self.timers.remove(&draft_id) {
            timer.handle.abort();
            debug!("Cancelled timer for draft {} pick {}", draft_id, timer.pick_number);
        }
    }

    /// Drop the entry for a timer that has fired, without aborting it
    pub(crate) fn release(&self, draft_id: DraftId, pick_number: u32) {
        self.timers.remove_if(&draft_id, |_, timer| timer.pick_number == pick_number);
    }

    #[cfg(test)]
    pub(crate) fn armed_pick(&self, draft_id: DraftId) -> Option<u32> {
        self.timers.get(&draft_id).map(|t| t.pick_number)
    }

    pub(crate) fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn cancel_all(&self) -> usize {
        let ids: Vec<DraftId> = self.timers.iter().map(|entry| *entry.key()).collect();
        for id in &ids {
            self.cancel(*id);
        }
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_rearming_aborts_previous() {
        let timers = PickTimers::new();
        let fired = Arc::new(AtomicU32::new(0));
        let draft_id = DraftId::new();

        for pick in 1..=2 {
            let fired = Arc::clone(&fired);
            timers.arm(draft_id, pick, Duration::from_secs(10), async move {
                fired.fetch_add(pick, Ordering::SeqCst);
            });
        }
        assert_eq!(timers.active_count(), 1);
        assert_eq!(timers.armed_pick(draft_id), Some(2));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_expiry() {
        let timers = PickTimers::new();
        let fired = Arc::new(AtomicU32::new(0));
        let draft_id = DraftId::new();

        let counter = Arc::clone(&fired);
        timers.arm(draft_id, 1, Duration::from_secs(5), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timers.cancel(draft_id);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timers.cancel_all(), 0);
    }

    #[tokio::test]
    async fn test_release_ignores_other_pick() {
        let timers = PickTimers::new();
        let draft_id = DraftId::new();
        timers.arm(draft_id, 3, Duration::from_secs(60), async {});

        timers.release(draft_id, 2);
        assert_eq!(timers.armed_pick(draft_id), Some(3));
        timers.release(draft_id, 3);
        assert_eq!(timers.armed_pick(draft_id), None);
    }
}
