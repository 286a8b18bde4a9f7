//! Pure aggregate recomputation.
//!
//! The ledger recomputes every aggregate from the complete review set on
//! each write, inside the submission transaction. Aggregates therefore
//! cannot drift from the underlying reviews, whatever the interleaving of
//! concurrent (and retried) writers.

use super::class_average::ClassAverage;

/// One review's contribution to the aggregates.
#[derive(Debug, Clone, Copy)]
pub struct RatingRow {
    pub teaching: f64,
    pub evaluation: f64,
    pub behaviour: f64,
    pub internals: f64,
    /// Reviews without a categorical input count as Medium.
    pub class_average: Option<ClassAverage>,
}

/// Recomputed aggregate statistics for one faculty.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub review_count: i32,
    pub teaching: f64,
    pub evaluation: f64,
    pub behaviour: f64,
    pub internals: f64,
    pub class_average: ClassAverage,
}

impl Aggregates {
    /// Exact arithmetic means over the given rows. An empty slice yields
    /// the zero-initialized state a freshly created faculty carries.
    pub fn compute(rows: &[RatingRow]) -> Self {
        if rows.is_empty() {
            return Self {
                review_count: 0,
                teaching: 0.0,
                evaluation: 0.0,
                behaviour: 0.0,
                internals: 0.0,
                class_average: ClassAverage::Medium,
            };
        }

        let n = rows.len() as f64;
        let mean = |f: fn(&RatingRow) -> f64| rows.iter().map(f).sum::<f64>() / n;

        let ordinal_mean = rows
            .iter()
            .map(|r| r.class_average.unwrap_or(ClassAverage::Medium).ordinal())
            .sum::<f64>()
            / n;

        Self {
            review_count: rows.len() as i32,
            teaching: mean(|r| r.teaching),
            evaluation: mean(|r| r.evaluation),
            behaviour: mean(|r| r.behaviour),
            internals: mean(|r| r.internals),
            class_average: ClassAverage::from_mean_ordinal(ordinal_mean),
        }
    }
}
