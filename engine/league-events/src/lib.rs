//! League events
//!
//! Every draft and waiver state transition is published as a [`LeagueEvent`] to an injected
//! [`EventSink`]. Delivery to managers happens downstream of the sink.

pub mod event;
pub mod sink;

pub use event::{AlertSeverity, LeagueEvent, PickEvent, WaiverAward};
pub use sink::{BroadcastSink, EventSink, FanoutSink, LogSink, MemorySink, NullSink};
