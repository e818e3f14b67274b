//! Driver trait and the in-memory driver
//!
//! A driver is the sink that turns entries into visible output. The
//! application and every transaction spawned from it share one driver, so
//! implementations take `&self` and do their own locking around the write.

use std::sync::{Mutex, PoisonError};

use crate::entry::Entry;
use crate::errors::{DataCollectorError, ExError};

/// Output sink for log entries
///
/// Available implementations live in `datacollector-drivers`
/// (`ConsoleWriter`, `FileWriter`); [`MemoryDriver`] keeps entries in memory.
#[cfg_attr(test, mockall::automock)]
pub trait Driver: Send + Sync {
    /// Record one fully formed entry
    ///
    /// # Errors
    ///
    /// Returns an error when the entry cannot be encoded or written.
    fn record_log(&self, entry: &Entry) -> Result<(), ExError>;

    /// Select the output representation by name
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error for unknown names; the previous
    /// encoding stays in effect.
    fn set_encoding(&self, encoding: &str) -> Result<(), ExError>;
}

/// Driver that stores every recorded entry in memory
///
/// Encoding has no effect on stored entries; only "plain" and "json" are
/// accepted so that it behaves like the other drivers.
#[derive(Debug)]
pub struct MemoryDriver {
    entries: Mutex<Vec<Entry>>,
    encoding: Mutex<String>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            encoding: Mutex::new("plain".to_string()),
        }
    }

    /// Snapshot of recorded entries in arrival order
    pub fn entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Currently selected encoding name
    pub fn encoding(&self) -> String {
        self.encoding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for MemoryDriver {
    fn record_log(&self, entry: &Entry) -> Result<(), ExError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }

    fn set_encoding(&self, encoding: &str) -> Result<(), ExError> {
        if encoding != "plain" && encoding != "json" {
            return Err(DataCollectorError::UnknownEncoding {
                encoding: encoding.to_string(),
            }
            .into());
        }
        *self.encoding.lock().unwrap_or_else(PoisonError::into_inner) = encoding.to_string();
        Ok(())
    }
}
