//! Transaction identifiers
//!
//! An identifier is the creation time in nanoseconds since the Unix epoch,
//! rendered as lowercase hex, followed by random bytes drawn from the OS
//! CSPRNG, also hex-encoded.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of random bytes appended to the timestamp
pub const RANDOM_BYTES: usize = 8;

/// Unique identifier for a single transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a new identifier from the current time and OS randomness
    ///
    /// # Errors
    ///
    /// Returns the underlying `getrandom::Error` when the randomness source
    /// is unavailable.
    pub fn generate() -> Result<Self, getrandom::Error> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut random = [0u8; RANDOM_BYTES];
        getrandom::getrandom(&mut random)?;

        Ok(Self(format!("{:x}{}", nanos, hex::encode(random))))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
