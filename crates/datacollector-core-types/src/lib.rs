//! Core types shared across the datacollector crates
//!
//! - **Transaction identifiers**: `TransactionId` generation and rendering
//! - **Schema constants**: canonical field keys and event names used by the
//!   internal diagnostics

pub mod schema;
pub mod transaction_id;

pub use transaction_id::TransactionId;
