//! Output dialect enum
//!
//! A single source of truth for the surface syntax a rendered query uses for
//! its bound parameters.

/// SQL dialect for rendering resolved placeholders
///
/// Each dialect decides how the internal parameter marker is written in the
/// final SQL text.
///
/// # Examples
///
/// ```
/// use quill_types::Dialect;
///
/// let dialect = Dialect::PostgreSQL;
/// assert!(dialect.uses_numbered_placeholders());
///
/// let mysql = Dialect::MySQL;
/// assert!(!mysql.uses_numbered_placeholders());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// Generic SQL - uses `?` positional placeholders
    #[default]
    Sql,

    /// MySQL - uses `?` positional placeholders
    ///
    /// Compatible with: mysql, mysql_async, sqlx
    MySQL,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    ///
    /// Compatible with: tokio-postgres, postgres, sqlx
    #[cfg_attr(feature = "serde", serde(alias = "postgres", alias = "pg"))]
    PostgreSQL,

    /// Raw - every parameter is inlined as a literal
    ///
    /// Not safe for untrusted input; meant for logs and debugging.
    Raw,

    /// A dialect tag this version does not recognise
    ///
    /// Rendering leaves parameter markers untouched.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl Dialect {
    /// Returns `true` if this dialect uses numbered placeholders (`$1, $2, ...`)
    #[inline]
    #[must_use]
    pub const fn uses_numbered_placeholders(&self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// Returns `true` if rendering returns a parameter list for external binding
    ///
    /// Only [`Dialect::Raw`] inlines values into the text instead.
    #[inline]
    #[must_use]
    pub const fn binds_parameters(&self) -> bool {
        !matches!(self, Dialect::Raw)
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports the common aliases:
    /// - Generic: `"sql"`
    /// - MySQL: `"mysql"`
    /// - PostgreSQL: `"postgresql"`, `"postgres"`, `"pg"`, `"pgsql"`
    /// - Raw: `"raw"`
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("mysql"), Some(Dialect::MySQL));
    /// assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("pg"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("oracle"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("sql") {
            Some(Dialect::Sql)
        } else if s.eq_ignore_ascii_case("mysql") {
            Some(Dialect::MySQL)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
            || s.eq_ignore_ascii_case("pgsql")
        {
            Some(Dialect::PostgreSQL)
        } else if s.eq_ignore_ascii_case("raw") {
            Some(Dialect::Raw)
        } else {
            None
        }
    }

    /// Lenient counterpart of [`Dialect::parse`]: unrecognised tags map to
    /// [`Dialect::Unknown`] instead of failing.
    ///
    /// ```
    /// use quill_types::Dialect;
    ///
    /// assert_eq!(Dialect::from_tag("raw"), Dialect::Raw);
    /// assert_eq!(Dialect::from_tag("sqlserver"), Dialect::Unknown);
    /// ```
    #[must_use]
    pub fn from_tag(s: &str) -> Self {
        Self::parse(s).unwrap_or(Dialect::Unknown)
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sql => "sql",
            Dialect::MySQL => "mysql",
            Dialect::PostgreSQL => "postgresql",
            Dialect::Raw => "raw",
            Dialect::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DialectParseError {}
