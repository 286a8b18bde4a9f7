use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::faculty::Faculty;

/// Stable faculty identifier: a normalized-name slug plus a random
/// four-digit disambiguator, e.g. `a-p-sharma-4821`. Immutable once
/// generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct FacultyId(String);

impl FacultyId {
    /// Generate a fresh id from a display name.
    pub fn generate(name: &str) -> Self {
        let slug = Faculty::normalize_name(name).replace(' ', "-");
        let disambiguator: u16 = rand::thread_rng().gen_range(1000..10000);
        Self(format!("{slug}-{disambiguator}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacultyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FacultyId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for FacultyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
