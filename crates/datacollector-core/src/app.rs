//! The logging facade
//!
//! An [`App`] filters each call against its configured minimum level, builds
//! an [`Entry`] and hands it to the shared driver. Direct calls on one app
//! are serialized by the app's record lock; transactions spawned from it use
//! their own locks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use datacollector_core_types::schema::{OP_APP_LOG, OP_RECORD_LOG};
use datacollector_core_types::TransactionId;

use crate::config::{Config, ConfigOption};
use crate::driver::Driver;
use crate::entry::{Attr, Entry};
use crate::errors::Result;
use crate::level::{is_enabled, Level};
use crate::logging_facility::elapsed_ms;
use crate::transaction::Transaction;
use crate::{log_op_error, log_suppressed};

/// App name stamped on entries emitted by the facility itself
pub const FACILITY_NAME: &str = "Data Collector";

/// Logging application bound to one driver and one configuration
pub struct App {
    driver: Arc<dyn Driver>,
    config: Config,
    record_lock: Mutex<()>,
    suppressed: AtomicU64,
}

impl App {
    /// Create an application that writes through `driver`
    ///
    /// Options are applied in order on top of [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns the first configuration error; no application is built.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use datacollector_core::{attr, config, App, Level, MemoryDriver};
    ///
    /// let driver = Arc::new(MemoryDriver::new());
    /// let app = App::new(
    ///     driver.clone(),
    ///     [config::with_app_name("billing"), config::with_log_level(Level::Info)],
    /// )
    /// .unwrap();
    ///
    /// app.debug("dropped", &[]);
    /// app.info("kept", &[attr("invoice", 7)]);
    /// assert_eq!(driver.len(), 1);
    /// ```
    pub fn new<I>(driver: Arc<dyn Driver>, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let config = Config::build(options)?;
        Ok(Self {
            driver,
            config,
            record_lock: Mutex::new(()),
            suppressed: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the driver this app records through
    pub fn driver(&self) -> Arc<dyn Driver> {
        Arc::clone(&self.driver)
    }

    /// Number of direct calls dropped by the level filter so far
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Begin a transaction that snapshots this app's driver and configuration
    ///
    /// # Errors
    ///
    /// Returns `TransactionIdUnavailable` when no identifier can be
    /// generated.
    pub fn start_transaction(&self, attributes: &[Attr]) -> Result<Transaction> {
        self.start_transaction_with(attributes, TransactionId::generate)
    }

    /// Start a transaction whose id comes from `generate_id`
    pub(crate) fn start_transaction_with<F>(
        &self,
        attributes: &[Attr],
        generate_id: F,
    ) -> Result<Transaction>
    where
        F: FnOnce() -> std::result::Result<TransactionId, getrandom::Error>,
    {
        let id = generate_id()?;
        Ok(Transaction::with_id(
            id,
            Arc::clone(&self.driver),
            self.config.clone(),
            attributes.to_vec(),
        ))
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

    /// Record `message` at `level` if the configured level allows it
    pub fn log(&self, level: Level, message: &str, attributes: &[Attr]) {
        if !is_enabled(self.config.log_level, level) {
            self.suppressed.fetch_add(1, Ordering::Relaxed);
            log_suppressed!(OP_APP_LOG, self.config.log_level, level);
            return;
        }

        let entry = Entry::new(
            level,
            self.config.app_name.clone(),
            message,
            attributes.to_vec(),
            None,
        );

        let _guard = self
            .record_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        record(self.driver.as_ref(), &entry);
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("suppressed", &self.suppressed_count())
            .finish_non_exhaustive()
    }
}

/// Hand `entry` to `driver`, reporting a failure through diagnostics
pub(crate) fn record(driver: &dyn Driver, entry: &Entry) {
    let started = Instant::now();
    if let Err(err) = driver.record_log(entry) {
        log_op_error!(
            OP_RECORD_LOG,
            err,
            duration_ms = elapsed_ms(started),
            level = entry.level().as_str()
        );
    }
}
