//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Selector evaluation
pub const FIELD_SELECTOR: &str = "selector";
pub const FIELD_OUTCOME: &str = "outcome";

// Collection sizes
pub const FIELD_SELECTOR_COUNT: &str = "selector_count";
pub const FIELD_CHANGED_COUNT: &str = "changed_count";
pub const FIELD_ERROR_COUNT: &str = "error_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_DIFF: &str = "diff";
pub const OP_DIFF_FIELD: &str = "diff_field";
pub const OP_LOAD_SETTINGS: &str = "load_settings";
