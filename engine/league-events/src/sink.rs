//! Notification sinks

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::event::{AlertSeverity, LeagueEvent};

/// Receives every league state transition
///
/// `publish` must not block; sinks that forward over the network should queue internally.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: LeagueEvent);
}

/// Fans events out to any number of tokio broadcast subscribers
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<LeagueEvent>,
}

impl BroadcastSink {
    /// Create a broadcaster with the given per-subscriber buffer
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LeagueEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, event: LeagueEvent) {
        let event_type = event.event_type();
        if self.sender.send(event).is_err() {
            debug!("No subscribers for {} event", event_type);
        }
    }
}

/// Writes each event to the tracing log as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: LeagueEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize {} event: {}", event.event_type(), e);
                return;
            }
        };

        match &event {
            LeagueEvent::LeagueAlert { severity: AlertSeverity::Critical, .. } => {
                error!(league_id = event.league_id(), event = %payload, "league event")
            }
            LeagueEvent::LeagueAlert { .. } => {
                warn!(league_id = event.league_id(), event = %payload, "league event")
            }
            _ => info!(league_id = event.league_id(), event = %payload, "league event"),
        }
    }
}

/// Records events in memory, used by tests and the CLI
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LeagueEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LeagueEvent> {
        self.events.lock().clone()
    }

    /// Wire names of recorded events, in publish order
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.event_type()).collect()
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.events.lock().iter().filter(|e| e.event_type() == event_type).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: LeagueEvent) {
        self.events.lock().push(event);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: LeagueEvent) {}
}

/// Publishes each event to every inner sink in order
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn publish(&self, event: LeagueEvent) {
        for sink in &self.sinks {
            sink.publish(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_event() -> LeagueEvent {
        LeagueEvent::DraftPaused {
            league_id: 5,
            draft_id: Uuid::new_v4(),
            pick_number: 4,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let sink = BroadcastSink::new(16);
        let mut rx1 = sink.subscribe();
        let mut rx2 = sink.subscribe();
        assert_eq!(sink.subscriber_count(), 2);

        let event = create_test_event();
        sink.publish(event.clone());

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_ok() {
        BroadcastSink::new(4).publish(create_test_event());
    }

    #[test]
    fn test_fanout_to_memory_sinks() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let fanout = FanoutSink::new()
            .with_sink(Arc::new(first.clone()))
            .with_sink(Arc::new(second.clone()))
            .with_sink(Arc::new(LogSink));

        fanout.publish(create_test_event());

        assert_eq!(fanout.len(), 3);
        assert_eq!(first.event_types(), vec!["draft_paused"]);
        assert_eq!(second.count("draft_paused"), 1);

        first.clear();
        assert!(first.events().is_empty());
    }
}
