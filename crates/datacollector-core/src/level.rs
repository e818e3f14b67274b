//! Log levels and level filtering
//!
//! Levels are ordered by increasing severity exactly as they appear in
//! [`Level::ALL`]. Ranks are positions in that sequence; nothing else
//! compares levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DataCollectorError;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "DEBUG")]
    Debug,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARNING")]
    Warning,
    #[serde(rename = "ERROR")]
    Error,
}

impl Level {
    /// All levels in order of increasing severity
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    /// Canonical upper-case name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Position of this level in [`Level::ALL`]
    pub fn rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|l| *l == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Look up a level by its canonical name
    ///
    /// Names are matched exactly; `"info"` is not a level.
    pub fn from_name(name: &str) -> Option<Level> {
        Self::ALL.iter().copied().find(|l| l.as_str() == name)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = DataCollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s).ok_or_else(|| DataCollectorError::InvalidLogLevel {
            value: s.to_string(),
        })
    }
}

/// Whether `candidate` passes a filter configured at `configured`
pub fn is_enabled(configured: Level, candidate: Level) -> bool {
    candidate.rank() >= configured.rank()
}

/// Name-based variant of [`is_enabled`]
///
/// Returns false whenever either name is not a known level, including when
/// both names are the same unknown string.
pub fn is_enabled_by_name(configured: &str, candidate: &str) -> bool {
    match (Level::from_name(configured), Level::from_name(candidate)) {
        (Some(configured), Some(candidate)) => is_enabled(configured, candidate),
        _ => false,
    }
}
