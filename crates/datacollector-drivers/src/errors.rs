//! Error handling for datacollector-drivers
//!
//! Wraps datacollector-core ExError with driver-specific helpers

use datacollector_core::errors::{ExError, ExErrorKind};
use datacollector_core::DataCollectorError;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an IO error that names the file involved
pub fn io_error_at(operation: &str, path: &std::path::Path, err: std::io::Error) -> ExError {
    io_error(operation, err).with_path(path.display().to_string())
}

/// Create a serialization error from serde_json::Error
pub fn serialization_error(err: serde_json::Error) -> ExError {
    ExError::from(DataCollectorError::from(err)).with_op("encode_entry")
}
