//! # Quill
//!
//! Composable SQL text with bound parameters.
//!
//! Queries are built from template fragments where each `?` is a placeholder
//! for the next argument. Fragments compose by appending (`and`, `or`,
//! `comma`, ...) or by nesting a query as an argument of another. Rendering
//! turns the result into dialect-specific SQL plus an ordered parameter list.
//!
//! ## Quick Start
//!
//! ```rust
//! use quill::prelude::*;
//!
//! # fn main() -> quill::Result<()> {
//! let mut filter = Query::optional("WHERE");
//! filter = filter.and("name = ?", ("Alice",));
//! filter = filter.and("id IN (?)", (vec![1, 2, 3],));
//!
//! let query = Query::new("SELECT * FROM users ?", (filter,));
//! let (sql, params) = query.to_pgsql()?;
//!
//! assert_eq!(sql, "SELECT * FROM users WHERE name = $1 AND id IN ($2,$3,$4)");
//! assert_eq!(params.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Dialects
//!
//! | Dialect      | Placeholder     | Parameters |
//! |--------------|-----------------|------------|
//! | `Sql`        | `?`             | returned   |
//! | `MySQL`      | `?`             | returned   |
//! | `PostgreSQL` | `$1`, `$2`, ... | returned   |
//! | `Raw`        | inline literal  | none       |
//! | `Unknown`    | internal marker | returned   |
//!
//! A literal `?` is written as `??` in template text.

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for query operations
pub use quill_core::error::Result;

/// Error types
pub mod error {
    pub use quill_core::error::{QueryError, ValueError};
}

/// Database dialect enum
pub use quill_types::{Dialect, DialectParseError};

pub use quill_core::args;
pub use quill_core::{
    Arg, Bytes, Embedded, Embedder, Flattened, Folded, Fragment, ImbalancePolicy, IntoArg,
    IntoArgs, Json, JsonList, JsonMap, OptionalQuery, Query, QueryError, Rendered, Renderer,
    Valuer, Value,
};

/// Placeholder syntax and the internal parameter marker.
pub mod placeholder {
    pub use quill_core::placeholder::{ESCAPED_PLACEHOLDER, PARAM_MARKER, PLACEHOLDER};
}

/// Separators used by the named append operations.
pub mod separators {
    pub use quill_core::LIST_SEPARATOR;
    pub use quill_core::query::{AND, COMMA, CONCAT, OR, SPACE};
}

/// Re-exports `serde_json` for building [`JsonMap`] and [`JsonList`] values.
pub use serde_json;

// =============================================================================
// Prelude
// =============================================================================

/// Everything needed to build and render queries.
///
/// ```rust
/// use quill::prelude::*;
/// ```
pub mod prelude {
    pub use crate::args;
    pub use quill_core::{
        Arg, Bytes, Dialect, Embedded, Embedder, Folded, ImbalancePolicy, IntoArg, IntoArgs,
        Json, JsonList, JsonMap, OptionalQuery, Query, QueryError, Rendered, Renderer, Valuer,
        Value,
    };
}
