use serde::{Deserialize, Serialize};

use crate::common::EngineError;

/// Rating range, inclusive on both ends.
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// The four numeric ratings of one submission. All fields are required.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingSet {
    pub teaching: f64,
    pub evaluation: f64,
    pub behaviour: f64,
    pub internals: f64,
}

impl RatingSet {
    /// Reject out-of-range or non-finite values before any write happens.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("teaching", self.teaching),
            ("evaluation", self.evaluation),
            ("behaviour", self.behaviour),
            ("internals", self.internals),
        ] {
            if !value.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(EngineError::Validation(format!(
                    "{field} must be a number between {RATING_MIN} and {RATING_MAX}, got {value}"
                )));
            }
        }
        Ok(())
    }
}
