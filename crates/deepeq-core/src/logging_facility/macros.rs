//! Canonical logging macros
//!
//! These macros emit `tracing` events with the `component`, `op` and `event`
//! fields every consumer relies on. They expand to `$crate` paths, so callers
//! need no direct dependency on `tracing`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use deepeq_core::log_op_start;
/// log_op_start!("deep_equal");
/// log_op_start!("deep_equal", left_type = "u8");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::__tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__tracing::debug!(
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
/// # use deepeq_core::log_op_end;
/// log_op_end!("deep_equal", duration_ms = 42);
/// log_op_end!("deep_equal", duration_ms = 42, visited = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::__tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::__tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that ended with a divergence
///
/// Adds the divergence code and path as `div.code` and `div.path`.
///
/// # Example
///
/// ```
/// # use deepeq_core::{log_op_divergence, errors::Divergence};
/// let divergence = Divergence::MissingKey.at_key("\"k\"");
/// log_op_divergence!("deep_equal", divergence, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_divergence {
    ($op:expr, $div:expr, duration_ms = $duration:expr) => {{
        let divergence: &$crate::errors::Divergence = &$div;
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_DIVERGENCE,
            duration_ms = $duration,
            div.code = divergence.code(),
            div.path = %divergence.path_string(),
        );
    }};
    ($op:expr, $div:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let divergence: &$crate::errors::Divergence = &$div;
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_DIVERGENCE,
            duration_ms = $duration,
            div.code = divergence.code(),
            div.path = %divergence.path_string(),
            $($field)*
        );
    }};
}
