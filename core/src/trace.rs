//! Tracing utilities for fragment building and rendering.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]`
//! boilerplate at every call site.

/// Emit a trace-level event for one built fragment.
///
/// ```ignore
/// quill_trace_fragment!(template, args.len(), errors.len());
/// ```
macro_rules! quill_trace_fragment {
    ($template:expr, $arg_count:expr, $error_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            template = %$template,
            args = $arg_count,
            errors = $error_count,
            "quill.fragment"
        );
    };
}

/// Emit a debug-level event with the rendered SQL text and parameter count.
macro_rules! quill_trace_render {
    ($dialect:expr, $sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(dialect = %$dialect, sql = %$sql, params = $param_count, "quill.render");
    };
}

/// Emit a warn-level event when a render is refused.
macro_rules! quill_trace_render_error {
    ($dialect:expr, $error:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(dialect = %$dialect, error = %$error, "quill.render.error");
    };
}

pub(crate) use {quill_trace_fragment, quill_trace_render, quill_trace_render_error};
