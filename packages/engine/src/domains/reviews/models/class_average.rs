use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Categorical class-average band.
///
/// Inputs map onto an ordinal scale (Low=1, Medium=2, High=3); the faculty
/// aggregate is the mean ordinal mapped back to a band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassAverage {
    Low,
    Medium,
    High,
}

impl ClassAverage {
    pub fn ordinal(self) -> f64 {
        match self {
            ClassAverage::Low => 1.0,
            ClassAverage::Medium => 2.0,
            ClassAverage::High => 3.0,
        }
    }

    /// Band a mean ordinal: ≤1.66 Low, ≤2.33 Medium, else High.
    pub fn from_mean_ordinal(mean: f64) -> Self {
        if mean <= 1.66 {
            ClassAverage::Low
        } else if mean <= 2.33 {
            ClassAverage::Medium
        } else {
            ClassAverage::High
        }
    }
}

impl std::fmt::Display for ClassAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassAverage::Low => write!(f, "low"),
            ClassAverage::Medium => write!(f, "medium"),
            ClassAverage::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for ClassAverage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(ClassAverage::Low),
            "medium" => Ok(ClassAverage::Medium),
            "high" => Ok(ClassAverage::High),
            _ => Err(anyhow::anyhow!("Invalid class average: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banding_thresholds() {
        assert_eq!(ClassAverage::from_mean_ordinal(1.0), ClassAverage::Low);
        assert_eq!(ClassAverage::from_mean_ordinal(1.66), ClassAverage::Low);
        assert_eq!(ClassAverage::from_mean_ordinal(2.0), ClassAverage::Medium);
        assert_eq!(ClassAverage::from_mean_ordinal(2.33), ClassAverage::Medium);
        assert_eq!(ClassAverage::from_mean_ordinal(2.34), ClassAverage::High);
        assert_eq!(ClassAverage::from_mean_ordinal(3.0), ClassAverage::High);
    }

    #[test]
    fn parse_round_trip() {
        for band in [ClassAverage::Low, ClassAverage::Medium, ClassAverage::High] {
            assert_eq!(band.to_string().parse::<ClassAverage>().unwrap(), band);
        }
        assert!("not rated".parse::<ClassAverage>().is_err());
    }
}
