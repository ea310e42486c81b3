//! WaiverEngine - Post-draft player acquisition
//!
//! Teams file claims on unrostered players between cutoffs. At each cutoff a resolution pass
//! awards every contested player to the best claim by waiver priority, then bid, then time,
//! executes the add, drop and budget debit as one roster transaction, and rotates priority.

pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod resolution;
pub mod scheduler;
pub mod types;

mod book;


pub use config::{PriorityPolicyKind, WaiverEngineConfig, WaiverScheduleConfig};
pub use engine::WaiverEngine;
pub use error::{ClaimRejection, WaiverError};
pub use policy::{PriorityPolicy, ReverseStandingsPriority, RollingPriority};
pub use resolution::plan_resolution;
pub use scheduler::{next_cutoff, WaiverScheduler};

// Re-export commonly used types
pub use types::{
    ClaimId, ClaimOutcome, ClaimRequest, ClaimStatus, ClaimUpdate, FailureReason, PlayerQueue,
    ResolutionSummary, TeamWaiverInfo, WaiverClaim, WaiverWirePlayer,
};

// Result type alias
pub type Result<T> = std::result::Result<T, WaiverError>;
