//! datacollector core - embeddable logging facade
//!
//! An application wraps a pluggable [`Driver`] and emits leveled,
//! attributed log entries, optionally scoped to a [`Transaction`]:
//! - Level ordering and filtering ([`level`])
//! - Immutable log entries with typed attribute values ([`entry`])
//! - Option-function configuration ([`config`])
//! - The application facade ([`App`]) and transactions ([`Transaction`])
//! - Canonical errors ([`errors`]) and internal diagnostics
//!   ([`logging_facility`])
//!
//! All calls are synchronous. Output encoding lives in the driver;
//! `datacollector-drivers` provides console and rotating file drivers.

pub mod app;
pub mod config;
pub mod driver;
pub mod entry;
pub mod errors;
pub mod level;
pub mod logging_facility;
pub mod transaction;

pub use datacollector_core_types as core_types;

// Re-export commonly used types
pub use app::{App, FACILITY_NAME};
pub use config::{with_app_name, with_log_level, Config, ConfigOption};
pub use core_types::TransactionId;
pub use driver::{Driver, MemoryDriver};
pub use entry::{attr, Attr, AttrValue, Entry};
pub use errors::{DataCollectorError, ExError, ExErrorKind, Result};
pub use level::{is_enabled, is_enabled_by_name, Level};
pub use transaction::{Transaction, TRANSACTION_ENDED_MESSAGE};
