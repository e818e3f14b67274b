//! Canonical diagnostics macros
//!
//! Every event carries `component`, `op` and `event` fields keyed on the
//! constants in `datacollector_core_types::schema`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use datacollector_core::log_op_start;
/// log_op_start!("transaction");
/// log_op_start!("transaction", transaction_id = "18a2f0c4");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use datacollector_core::log_op_end;
/// log_op_end!("transaction", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into an `ExError` so the event always carries a
/// stable code.
///
/// # Example
///
/// ```
/// # use datacollector_core::{log_op_error, errors::{ExError, ExErrorKind}};
/// let err = ExError::new(ExErrorKind::Io).with_message("disk full");
/// log_op_error!("record_log", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($field)*
        );
    }};
}

/// Log a call dropped by the level filter
///
/// # Example
///
/// ```
/// # use datacollector_core::{log_suppressed, Level};
/// log_suppressed!("app_log", Level::Info, Level::Debug);
/// ```
#[macro_export]
macro_rules! log_suppressed {
    ($op:expr, $configured:expr, $requested:expr) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_SUPPRESSED,
            configured_level = $configured.as_str(),
            requested_level = $requested.as_str(),
        );
    };
    ($op:expr, $configured:expr, $requested:expr, $($field:tt)*) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_SUPPRESSED,
            configured_level = $configured.as_str(),
            requested_level = $requested.as_str(),
            $($field)*
        );
    };
}
