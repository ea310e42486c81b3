//! Player Registry - read-only player catalog for the league core
//!
//! The registry holds the reference data both acquisition engines validate against
//! (id, name, position, pro team, ranking score). It is loaded once per draft or waiver
//! cycle and never mutated while engines read from it.

pub mod catalog;
pub mod hashing;
pub mod ranking;
pub mod registry;
pub mod types;

pub use catalog::PlayerCatalog;
pub use ranking::{ProjectedPoints, RankingStrategy, WeightedForm};
pub use registry::PlayerRegistry;
pub use types::{CatalogEntry, CatalogError, CatalogFile, PlayerId, PlayerRecord, PlayerStats};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
