//! DraftEngine - Turn-based player draft
//!
//! Generates the turn order, validates and records picks through the roster store, runs one
//! cancellable pick timer per active draft and falls back to auto-pick when a team misses its
//! deadline. Mock drafts run the same selection logic offline.

pub mod auto_pick;
pub mod config;
pub mod engine;
pub mod error;
pub mod mock;
pub mod order;
pub mod types;

mod timer;

#[cfg(test)]
mod integration_tests;

pub use auto_pick::{select_auto_pick, PositionCaps};
pub use config::{DraftConfig, DraftEngineConfig};
pub use engine::DraftEngine;
pub use error::{DraftError, PickRejection};
pub use mock::{simulate_draft, MockDraft, MockPick};
pub use order::{generate_turn_order, DraftOrder};
pub use types::{Draft, DraftId, DraftOrderType, DraftStatus, DraftStatusView, DraftType, Pick};

// Result type alias
pub type Result<T> = std::result::Result<T, DraftError>;
