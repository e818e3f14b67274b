//! Canonical schema constants for the internal diagnostics
//!
//! These keep field names and event names consistent between the logging
//! macros, the test capture layer and the tests.

// Canonical field keys for structured diagnostics
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_TRANSACTION_ID: &str = "transaction_id";
pub const FIELD_APP_NAME: &str = "app_name";

// Level filtering
pub const FIELD_CONFIGURED_LEVEL: &str = "configured_level";
pub const FIELD_REQUESTED_LEVEL: &str = "requested_level";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SUPPRESSED: &str = "suppressed";

// Canonical operation names
pub const OP_APP_LOG: &str = "app_log";
pub const OP_TRANSACTION_LOG: &str = "transaction_log";
pub const OP_RECORD_LOG: &str = "record_log";
pub const OP_TRANSACTION: &str = "transaction";
pub const OP_SET_ENCODING: &str = "set_encoding";
pub const OP_ROTATE: &str = "rotate";
