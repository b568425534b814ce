//! Canonical logging macros
//!
//! Every macro emits `component`, `op` and `event` using the names from
//! `kdelta_core_types::schema`, followed by any extra fields.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use kdelta_core::log_op_start;
/// log_op_start!("diff");
/// log_op_start!("diff", selector_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {{
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_START,
        );
    }};
    ($op:expr, $($field:tt)*) => {{
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_START,
            $($field)*
        );
    }};
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use kdelta_core::log_op_end;
/// log_op_end!("diff", duration_ms = 4);
/// log_op_end!("diff", duration_ms = 4, changed_count = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {{
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    }};
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    }};
}

/// Log an operation error
///
/// `$err` must convert into [`crate::errors::ExError`]; its kind and stable
/// code are attached to the event.
///
/// # Example
///
/// ```
/// # use kdelta_core::log_op_error;
/// # use kdelta_core::selector::Selector;
/// let err = Selector::parse("a[").unwrap_err();
/// log_op_error!("validate", &err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::kdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
