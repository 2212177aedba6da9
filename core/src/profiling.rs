//! Profiling utilities for flattening and rendering
//!
//! Integrates with the puffin profiler when the "profiling" feature is
//! enabled; otherwise the macro expands to nothing.

/// Profile scope around a rendering stage.
macro_rules! quill_profile_scope {
    ($operation:literal) => {
        #[cfg(feature = "profiling")]
        puffin::profile_scope!("quill", $operation);
    };
}

pub(crate) use quill_profile_scope;
