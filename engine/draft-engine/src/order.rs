//! Turn-order generation

use roster_store::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DraftError;
use crate::types::{DraftOrderType, DraftType};

/// How the round-one order is chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftOrder {
    /// Shuffle the league's teams; a seed makes the shuffle reproducible
    Random { seed: Option<u64> },
    /// Use this order as given
    Custom(Vec<TeamId>),
    /// Standings best-first; the worst team drafts first
    ReverseStandings(Vec<TeamId>),
}

impl Default for DraftOrder {
    fn default() -> Self {
        DraftOrder::Random { seed: None }
    }
}

impl DraftOrder {
    pub fn order_type(&self) -> DraftOrderType {
        match self {
            DraftOrder::Random { .. } => DraftOrderType::Random,
            DraftOrder::Custom(_) => DraftOrderType::Custom,
            DraftOrder::ReverseStandings(_) => DraftOrderType::ReverseStandings,
        }
    }

    /// Resolve the round-one order for the given league teams
    ///
    /// Supplied orders must name every team exactly once.
    pub fn base_order(&self, teams: &[TeamId]) -> Result<Vec<TeamId>, DraftError> {
        match self {
            DraftOrder::Random { seed } => {
                let mut order = teams.to_vec();
                let mut rng = match seed {
                    Some(seed) => fastrand::Rng::with_seed(*seed),
                    None => fastrand::Rng::new(),
                };
                rng.shuffle(&mut order);
                Ok(order)
            }
            DraftOrder::Custom(order) => {
                check_covers(order, teams)?;
                Ok(order.clone())
            }
            DraftOrder::ReverseStandings(standings) => {
                check_covers(standings, teams)?;
                Ok(standings.iter().rev().copied().collect())
            }
        }
    }
}

fn check_covers(order: &[TeamId], teams: &[TeamId]) -> Result<(), DraftError> {
    let supplied: HashSet<TeamId> = order.iter().copied().collect();
    let expected: HashSet<TeamId> = teams.iter().copied().collect();

    if supplied.len() != order.len() {
        return Err(DraftError::InvalidConfig("draft order lists a team twice".to_string()));
    }
    if supplied != expected {
        return Err(DraftError::InvalidConfig(format!(
            "draft order {order:?} does not match league teams {teams:?}"
        )));
    }
    Ok(())
}

/// Expand a base order into one entry per pick
///
/// Snake drafts reverse the base order on every even round (1-indexed).
pub fn generate_turn_order(base: &[TeamId], rounds: u32, draft_type: DraftType) -> Vec<TeamId> {
    let mut turn_order = Vec::with_capacity(base.len() * rounds as usize);

    for round in 1..=rounds {
        if draft_type == DraftType::Snake && round % 2 == 0 {
            turn_order.extend(base.iter().rev());
        } else {
            turn_order.extend(base.iter());
        }
    }

    turn_order
}
