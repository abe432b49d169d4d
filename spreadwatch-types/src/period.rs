use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Historical window requested from the data source.
///
/// The wire representation (`1d`, `5d`, `1mo`, `3mo`, `6mo`) is used both in
/// the request query string and in serialized configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Period {
    /// One day.
    #[serde(rename = "1d")]
    D1,
    /// Five days.
    #[serde(rename = "5d")]
    D5,
    /// One month.
    #[default]
    #[serde(rename = "1mo")]
    M1,
    /// Three months.
    #[serde(rename = "3mo")]
    M3,
    /// Six months.
    #[serde(rename = "6mo")]
    M6,
}

impl Period {
    /// All periods in ascending window order.
    pub const ALL: [Self; 5] = [Self::D1, Self::D5, Self::M1, Self::M3, Self::M6];

    /// Query-string value for this period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::M1 => "1mo",
            Self::M3 => "3mo",
            Self::M6 => "6mo",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "unknown period '{trimmed}' (expected one of 1d, 5d, 1mo, 3mo, 6mo)"
                ))
            })
    }
}
