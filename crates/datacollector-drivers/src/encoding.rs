//! Entry encodings shared by the drivers
//!
//! Plain output is one line per entry:
//!
//! ```text
//! time:2024-05-01T10:00:00Z, level:INFO, app_name:Shop, message:paid, attributes:[{order 7}] transaction_id:18c2...
//! ```
//!
//! JSON output is the pretty-printed serde form of [`Entry`], which omits
//! `attributes` when empty and `transaction_id` when absent.

use std::fmt;
use std::str::FromStr;

use chrono::SecondsFormat;
use datacollector_core::{DataCollectorError, Entry};

use crate::errors::{serialization_error, Result};

/// Output representation of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Plain,
    Json,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Plain => "plain",
            Encoding::Json => "json",
        }
    }

    /// Render one entry, without a trailing newline
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if JSON encoding fails.
    pub fn render(&self, entry: &Entry) -> Result<String> {
        match self {
            Encoding::Plain => Ok(render_plain(entry)),
            Encoding::Json => serde_json::to_string_pretty(entry).map_err(serialization_error),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = DataCollectorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Encoding::Plain),
            "json" => Ok(Encoding::Json),
            other => Err(DataCollectorError::UnknownEncoding {
                encoding: other.to_string(),
            }),
        }
    }
}

fn render_plain(entry: &Entry) -> String {
    let attributes = entry
        .attributes()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut line = format!(
        "time:{}, level:{}, app_name:{}, message:{}, attributes:[{}]",
        entry.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
        entry.level(),
        entry.app_name(),
        entry.message(),
        attributes
    );

    if let Some(id) = entry.transaction_id() {
        line.push_str(" transaction_id:");
        line.push_str(id.as_str());
    }

    line
}
