//! Transactions: identified logging scopes with an end
//!
//! A transaction snapshots the app's configuration when it starts. While
//! active, entries carry its identifier and attributes. Once ended, every
//! log call produces a single facility error entry instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use datacollector_core_types::schema::{OP_TRANSACTION, OP_TRANSACTION_LOG};
use datacollector_core_types::TransactionId;

use crate::app::{record, FACILITY_NAME};
use crate::config::Config;
use crate::driver::Driver;
use crate::entry::{Attr, Entry};
use crate::level::{is_enabled, Level};
use crate::logging_facility::elapsed_ms;
use crate::{log_op_end, log_op_start, log_suppressed};

/// Message recorded for any log call on an ended transaction
pub const TRANSACTION_ENDED_MESSAGE: &str = "Transaction already ended!";

/// A logging scope started from an [`App`](crate::App)
///
/// Call [`Transaction::end`] when the unit of work is done.
pub struct Transaction {
    id: TransactionId,
    driver: Arc<dyn Driver>,
    config: Config,
    attributes: Vec<Attr>,
    active: Mutex<bool>,
    started: Instant,
    suppressed: AtomicU64,
}

impl Transaction {
    pub(crate) fn with_id(
        id: TransactionId,
        driver: Arc<dyn Driver>,
        config: Config,
        attributes: Vec<Attr>,
    ) -> Self {
        log_op_start!(
            OP_TRANSACTION,
            transaction_id = id.as_str(),
            app_name = config.app_name.as_str()
        );
        Self {
            id,
            driver,
            config,
            attributes,
            active: Mutex::new(true),
            started: Instant::now(),
            suppressed: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// Attributes attached when the transaction started
    pub fn attributes(&self) -> &[Attr] {
        &self.attributes
    }

    /// Configuration captured from the app at start time
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of calls dropped by the level filter while active
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Mark the transaction inactive
    ///
    /// Idempotent. Nothing is sent to the driver; only later log calls
    /// produce the "already ended" entry.
    pub fn end(&self) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if *active {
            *active = false;
            log_op_end!(
                OP_TRANSACTION,
                duration_ms = elapsed_ms(self.started),
                transaction_id = self.id.as_str()
            );
        }
    }

    pub fn debug(&self, message: &str, attributes: &[Attr]) {
        self.log(Level::Debug, message, attributes);
    }

    pub fn info(&self, message: &str, attributes: &[Attr]) {
        self.log(Level::Info, message, attributes);
    }

    pub fn warning(&self, message: &str, attributes: &[Attr]) {
        self.log(Level::Warning, message, attributes);
    }

    pub fn error(&self, message: &str, attributes: &[Attr]) {
        self.log(Level::Error, message, attributes);
    }

    /// Record `message` at `level` within this transaction
    ///
    /// The active check and the driver call happen under one lock, so a
    /// concurrent [`Transaction::end`] lands either before or after the
    /// whole call.
    pub fn log(&self, level: Level, message: &str, attributes: &[Attr]) {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if !*active {
            let entry = Entry::new(
                Level::Error,
                FACILITY_NAME,
                TRANSACTION_ENDED_MESSAGE,
                Vec::new(),
                None,
            );
            record(self.driver.as_ref(), &entry);
            return;
        }

        if !is_enabled(self.config.log_level, level) {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            log_suppressed!(
                OP_TRANSACTION_LOG,
                self.config.log_level,
                level,
                transaction_id = self.id.as_str()
            );
            return;
        }

        let mut merged = Vec::with_capacity(self.attributes.len() + attributes.len());
        merged.extend_from_slice(&self.attributes);
        merged.extend_from_slice(attributes);

        let entry = Entry::new(
            level,
            self.config.app_name.clone(),
            message,
            merged,
            Some(self.id.clone()),
        );
        record(self.driver.as_ref(), &entry);
        drop(active);
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
