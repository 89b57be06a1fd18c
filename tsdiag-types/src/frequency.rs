use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiagError;

/// Calendar-aligned sampling granularity used by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One bucket per UTC calendar day.
    Daily,
    /// One bucket per ISO week, Monday to Sunday, labelled by its Sunday.
    #[default]
    Weekly,
    /// One bucket per calendar month, labelled by its last day.
    Monthly,
}

impl Frequency {
    /// All supported frequencies, finest first.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Short pandas-style alias (`D`, `W`, `M`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Daily => "D",
            Self::Weekly => "W",
            Self::Monthly => "M",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = DiagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "daily" | "day" => Ok(Self::Daily),
            "w" | "weekly" | "week" => Ok(Self::Weekly),
            "m" | "monthly" | "month" => Ok(Self::Monthly),
            other => Err(DiagError::InvalidArg(format!(
                "unknown frequency '{other}' (expected daily, weekly or monthly)"
            ))),
        }
    }
}
