//! The canonical combined score.
//!
//! This is the only place the weighting exists. The ledger stores the
//! result on the faculty row in the same transaction as every aggregate
//! write, and ranking sorts by the stored value, so every surface shows
//! the same number.

use crate::domains::reviews::models::Aggregates;

pub const WEIGHT_TEACHING: f64 = 0.35;
pub const WEIGHT_EVALUATION: f64 = 0.35;
pub const WEIGHT_INTERNALS: f64 = 0.20;
pub const WEIGHT_BEHAVIOUR: f64 = 0.10;

/// Weighted combination of the per-category means, in [0, 5].
pub fn overall_score(aggregates: &Aggregates) -> f64 {
    WEIGHT_TEACHING * aggregates.teaching
        + WEIGHT_EVALUATION * aggregates.evaluation
        + WEIGHT_INTERNALS * aggregates.internals
        + WEIGHT_BEHAVIOUR * aggregates.behaviour
}
