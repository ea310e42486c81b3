//! RosterStore - League roster ownership
//!
//! This crate owns the player → team mapping for every league. The draft and waiver engines
//! request roster mutations through the [`RosterStore`] trait and never touch ownership
//! directly. Multi-step mutations go through [`RosterTransaction`], which applies as one unit.

pub mod config;
pub mod error;
pub mod memory;
pub mod pool;
pub mod retry;
pub mod store;
pub mod transaction;
pub mod types;

pub use config::RosterStoreConfig;
pub use error::RosterError;
pub use memory::InMemoryRosterStore;
pub use pool::list_available;
pub use retry::{run_with_retry, RetryConfig};
pub use store::RosterStore;
pub use transaction::{RosterOp, RosterTransaction};

// Re-export commonly used types
pub use types::{LeagueId, Roster, RosterEntry, RosterSlot, TeamId, TeamInfo, TeamWaiverState};

// Result type alias
pub type Result<T> = std::result::Result<T, RosterError>;
