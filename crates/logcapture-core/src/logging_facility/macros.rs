//! Canonical diagnostic macros
//!
//! The engine's own diagnostics carry `component`, `op` and `event` fields so
//! they can be filtered and asserted on uniformly.

/// Emit a debug diagnostic for an engine operation
///
/// # Example
///
/// ```
/// # use logcapture_core::log_op;
/// log_op!("get_logger", "logger_created");
/// log_op!("get_logger", "logger_created", logger = "app");
/// ```
#[macro_export]
macro_rules! log_op {
    ($op:expr, $event:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $event,
        );
    };
    ($op:expr, $event:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($field)*
        );
    };
}

/// Emit a warning for an engine operation that recovered from a failure
///
/// # Example
///
/// ```
/// # use logcapture_core::log_op_warn;
/// log_op_warn!("load_config", "config_fallback", reason = "unreadable");
/// ```
#[macro_export]
macro_rules! log_op_warn {
    ($op:expr, $event:expr) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $event,
        );
    };
    ($op:expr, $event:expr, $($field:tt)*) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($field)*
        );
    };
}
