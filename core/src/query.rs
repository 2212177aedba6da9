//! Query composition.
//!
//! A [`Query`] is an ordered list of built fragments. Appends prefix the new
//! fragment with a separator (omitted for the first one); flattening
//! concatenates texts and parameters in the same order.

use compact_str::CompactString;

use crate::{
    Dialect, Fragment, IntoArgs, QueryError, Value,
    error::Result,
    profiling::quill_profile_scope,
    render::{ImbalancePolicy, Rendered, Renderer},
};

pub const AND: &str = " AND ";
pub const OR: &str = " OR ";
pub const COMMA: &str = ",";
pub const SPACE: &str = " ";
pub const CONCAT: &str = "";

/// A composed query.
///
/// ```ignore
/// let mut filter = Query::optional("WHERE");
/// if let Some(name) = name {
///     filter = filter.and("name = ?", (name,));
/// }
/// let q = Query::new("SELECT * FROM users ?", (filter,));
/// let (sql, params) = q.to_pgsql()?;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    fragments: Vec<Fragment>,
    prefix: Option<CompactString>,
}

/// The internal form of a query: text still carrying parameter markers and
/// escaped `??` runs, the ordered parameters and every collected error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flattened {
    pub text: String,
    pub params: Vec<Value>,
    pub errors: Vec<QueryError>,
}

impl Flattened {
    /// The collected errors joined into one, if any.
    pub fn error(&self) -> Option<QueryError> {
        QueryError::join(self.errors.iter().cloned())
    }
}

impl Query {
    /// Creates a query seeded with one fragment.
    pub fn new(template: &str, args: impl IntoArgs) -> Self {
        Self {
            fragments: vec![Fragment::build(template, args)],
            prefix: None,
        }
    }

    /// Creates a query with no fragments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an empty query whose `prefix` is emitted, followed by a space,
    /// only if at least one fragment is appended.
    pub fn optional(prefix: impl Into<CompactString>) -> Self {
        Self {
            fragments: Vec::new(),
            prefix: Some(prefix.into()),
        }
    }

    // ==================== append ====================

    /// Appends a fragment, preceded by `separator` unless it is the first.
    pub fn join(mut self, separator: &str, template: &str, args: impl IntoArgs) -> Self {
        let fragment = Fragment::build(template, args);
        let fragment = if self.fragments.is_empty() {
            fragment
        } else {
            fragment.prefixed(separator)
        };
        self.fragments.push(fragment);
        self
    }

    #[inline]
    pub fn and(self, template: &str, args: impl IntoArgs) -> Self {
        self.join(AND, template, args)
    }

    #[inline]
    pub fn or(self, template: &str, args: impl IntoArgs) -> Self {
        self.join(OR, template, args)
    }

    #[inline]
    pub fn comma(self, template: &str, args: impl IntoArgs) -> Self {
        self.join(COMMA, template, args)
    }

    #[inline]
    pub fn concat(self, template: &str, args: impl IntoArgs) -> Self {
        self.join(CONCAT, template, args)
    }

    #[inline]
    pub fn space(self, template: &str, args: impl IntoArgs) -> Self {
        self.join(SPACE, template, args)
    }

    // ==================== inspection ====================

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Errors collected by every fragment so far, in order.
    pub fn errors(&self) -> impl Iterator<Item = &QueryError> {
        self.fragments.iter().flat_map(|f| f.errors().iter())
    }

    /// Returns `true` if no fragment recorded an error.
    pub fn is_ok(&self) -> bool {
        self.fragments.iter().all(Fragment::is_ok)
    }

    /// Concatenates the fragments into one text and one parameter list.
    pub fn flatten(&self) -> Flattened {
        quill_profile_scope!("flatten");

        let text_len: usize = self.fragments.iter().map(|f| f.text().len()).sum();
        let param_len: usize = self.fragments.iter().map(|f| f.params().len()).sum();
        let mut flat = Flattened {
            text: String::with_capacity(text_len + 16),
            params: Vec::with_capacity(param_len),
            errors: Vec::new(),
        };

        let prefix = self.prefix.as_deref().filter(|p| !p.is_empty());
        if let (Some(prefix), false) = (prefix, self.fragments.is_empty()) {
            flat.text.push_str(prefix);
            flat.text.push(' ');
        }

        for fragment in &self.fragments {
            flat.text.push_str(fragment.text());
            flat.params.extend_from_slice(fragment.params());
            flat.errors.extend_from_slice(fragment.errors());
        }
        flat
    }

    // ==================== rendering ====================

    /// Renders the query for `dialect` with the default renderer.
    pub fn render(&self, dialect: Dialect) -> Result<Rendered> {
        Renderer::new(dialect).render_query(self)
    }

    /// Generic SQL with `?` placeholders.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::Sql).map(Rendered::into_parts)
    }

    /// MySQL SQL with `?` placeholders.
    pub fn to_mysql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::MySQL).map(Rendered::into_parts)
    }

    /// PostgreSQL SQL with `$1, $2, ...` placeholders.
    pub fn to_pgsql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::PostgreSQL).map(Rendered::into_parts)
    }

    /// SQL with every parameter inlined as a literal.
    ///
    /// Strings are quoted without escaping; never use this for untrusted input.
    pub fn to_raw(&self) -> Result<String> {
        self.render(Dialect::Raw).map(|rendered| rendered.sql)
    }

    /// The generic rendering, its parameters and its error, one per line.
    ///
    /// Never panics: placeholder imbalance is reported, not raised.
    pub fn debug_string(&self) -> String {
        let rendered = Renderer::new(Dialect::Sql)
            .with_imbalance_policy(ImbalancePolicy::Report)
            .render_query(self);
        debug_lines(rendered)
    }

    /// Prints [`Query::debug_string`] to stdout.
    pub fn print(&self) {
        println!("{}", self.debug_string());
    }
}

fn debug_lines(rendered: Result<Rendered>) -> String {
    let (sql, params, error) = match rendered {
        Ok(Rendered { sql, params }) => (sql, params, None),
        Err(error) => (String::new(), Vec::new(), Some(error)),
    };
    let params = params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let error = error.map_or_else(|| "<nil>".to_string(), |e| e.to_string());
    format!("SQL: {sql}\nPARAMS: [{params}]\nERROR: {error}")
}

/// Query operations on an absent query.
///
/// `None` is a legal receiver: appends start a fresh one-fragment query and
/// renders report [`QueryError::AbsentQuery`]. Appends are named `join_*`
/// because `Option` already has inherent `and`/`or` methods.
pub trait OptionalQuery: Sized {
    fn join(self, separator: &str, template: &str, args: impl IntoArgs) -> Query;

    fn join_and(self, template: &str, args: impl IntoArgs) -> Query {
        self.join(AND, template, args)
    }

    fn join_or(self, template: &str, args: impl IntoArgs) -> Query {
        self.join(OR, template, args)
    }

    fn join_comma(self, template: &str, args: impl IntoArgs) -> Query {
        self.join(COMMA, template, args)
    }

    fn join_concat(self, template: &str, args: impl IntoArgs) -> Query {
        self.join(CONCAT, template, args)
    }

    fn join_space(self, template: &str, args: impl IntoArgs) -> Query {
        self.join(SPACE, template, args)
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render(&self, dialect: Dialect) -> Result<Rendered>;

    fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::Sql).map(Rendered::into_parts)
    }

    fn to_mysql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::MySQL).map(Rendered::into_parts)
    }

    fn to_pgsql(&self) -> Result<(String, Vec<Value>)> {
        self.render(Dialect::PostgreSQL).map(Rendered::into_parts)
    }

    fn to_raw(&self) -> Result<String> {
        self.render(Dialect::Raw).map(|rendered| rendered.sql)
    }

    fn debug_string(&self) -> String;

    fn print(&self) {
        println!("{}", self.debug_string());
    }
}

impl OptionalQuery for Option<Query> {
    fn join(self, separator: &str, template: &str, args: impl IntoArgs) -> Query {
        match self {
            Some(query) => query.join(separator, template, args),
            None => Query::new(template, args),
        }
    }

    fn len(&self) -> usize {
        self.as_ref().map_or(0, Query::len)
    }

    fn render(&self, dialect: Dialect) -> Result<Rendered> {
        match self {
            Some(query) => query.render(dialect),
            None => Err(QueryError::AbsentQuery),
        }
    }

    fn debug_string(&self) -> String {
        match self {
            Some(query) => query.debug_string(),
            None => debug_lines(Err(QueryError::AbsentQuery)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_skip_first_fragment() {
        let q = Query::empty().and("a = ?", (1,)).and("b = ?", (2,));
        let (sql, params) = q.to_sql().unwrap();
        assert_eq!(sql, "a = ? AND b = ?");
        assert_eq!(params, vec![Value::I32(1), Value::I32(2)]);
    }

    #[test]
    fn named_joins() {
        let q = Query::new("a", ())
            .or("b", ())
            .comma("c", ())
            .concat("d", ())
            .space("e", ())
            .join(" | ", "f", ());
        assert_eq!(q.to_sql().unwrap().0, "a OR b,cd e | f");
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn optional_prefix_only_when_populated() {
        let empty = Query::optional("WHERE");
        assert!(empty.is_empty());
        assert_eq!(empty.to_sql().unwrap().0, "");

        let one = Query::optional("WHERE").and("a = ?", (1,));
        assert_eq!(one.to_sql().unwrap().0, "WHERE a = ?");

        let two = Query::optional("WHERE").and("a = ?", (1,)).and("b = ?", (2,));
        assert_eq!(two.to_sql().unwrap().0, "WHERE a = ? AND b = ?");
    }

    #[test]
    fn absent_query_constructs_on_append() {
        let absent: Option<Query> = None;
        assert_eq!(absent.len(), 0);
        assert!(absent.is_empty());

        let q = absent.join_and("a = ?", (1,));
        assert_eq!(q.len(), 1);
        assert_eq!(q.to_sql().unwrap().0, "a = ?");

        let present = Some(q).join_or("b = ?", (2,));
        assert_eq!(present.to_sql().unwrap().0, "a = ? OR b = ?");
    }

    #[test]
    fn absent_query_cannot_render() {
        let absent: Option<Query> = None;
        assert_eq!(absent.to_sql(), Err(QueryError::AbsentQuery));
        assert_eq!(absent.to_pgsql(), Err(QueryError::AbsentQuery));
        assert_eq!(absent.to_mysql(), Err(QueryError::AbsentQuery));
        assert_eq!(absent.to_raw(), Err(QueryError::AbsentQuery));
        assert_eq!(
            absent.render(Dialect::Unknown),
            Err(QueryError::AbsentQuery)
        );
    }

    #[test]
    fn errors_are_visible_before_rendering() {
        let q = Query::new("a = ?", ()).and("b = ?", (1, 2));
        assert!(!q.is_ok());
        assert_eq!(q.errors().count(), 2);
    }

    #[test]
    fn debug_string_reports_everything() {
        let q = Query::new("a = ? AND b = ?", (1, "x"));
        assert_eq!(
            q.debug_string(),
            "SQL: a = ? AND b = ?\nPARAMS: [1 x]\nERROR: <nil>"
        );

        let bad = Query::new("a = ?", ());
        assert_eq!(
            bad.debug_string(),
            "SQL: \nPARAMS: []\nERROR: extra ? in text: a = ? (0 args)"
        );

        assert_eq!(
            None::<Query>.debug_string(),
            "SQL: \nPARAMS: []\nERROR: cannot operate on an absent query"
        );
    }
}
