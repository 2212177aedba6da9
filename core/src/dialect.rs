//! Dialect type re-exported from quill-types with core-specific extensions.

use std::borrow::Cow;

/// Re-export the unified Dialect enum from quill-types
pub use quill_types::Dialect;

/// Extension trait for dialect-specific placeholder rendering
pub trait DialectExt {
    /// Renders the bind placeholder for the given 1-based index.
    ///
    /// Returns `None` for dialects without bind syntax ([`Dialect::Raw`]
    /// inlines values, [`Dialect::Unknown`] keeps the marker).
    ///
    /// # Examples
    /// - PostgreSQL: `$1`, `$2`, `$3`
    /// - Generic/MySQL: `?`
    fn render_placeholder(&self, index: usize) -> Option<Cow<'static, str>>;
}

impl DialectExt for Dialect {
    #[inline]
    fn render_placeholder(&self, index: usize) -> Option<Cow<'static, str>> {
        match self {
            Dialect::PostgreSQL => Some(Cow::Owned(format!("${index}"))),
            Dialect::Sql | Dialect::MySQL => Some(Cow::Borrowed("?")),
            Dialect::Raw | Dialect::Unknown => None,
        }
    }
}
