pub mod arg;
pub mod dialect;
pub mod error;
pub mod fragment;
pub mod placeholder;
pub mod query;
pub mod render;
pub mod tuple;
pub mod value;

mod profiling;
mod trace;

// Re-export key types and traits
pub use arg::{Arg, Bytes, Embedded, Embedder, Folded, IntoArg, Json, JsonList, JsonMap, Valuer};
pub use dialect::{Dialect, DialectExt};
pub use error::{QueryError, Result, ValueError};
pub use fragment::{Fragment, LIST_SEPARATOR};
pub use placeholder::{ESCAPED_PLACEHOLDER, PARAM_MARKER, PLACEHOLDER};
pub use query::{Flattened, OptionalQuery, Query};
pub use render::{ImbalancePolicy, Rendered, Renderer};
pub use tuple::IntoArgs;
pub use value::Value;

/// Builds a `Vec<Arg>` from heterogeneous arguments.
///
/// Usage: `args![1, "x", Embedded::new("name")]`. Useful past the largest
/// tuple arity or when the argument list is assembled conditionally.
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoArg::into_arg($arg)),+]
    };
}
