//! Dialect renderer.
//!
//! A second, independent pass over flattened text: every internal parameter
//! marker becomes dialect syntax (or an inline literal) and every escaped
//! `??` becomes one `?`. Both rewrites happen in the same left-to-right scan
//! and substituted text is never scanned again.

use std::borrow::Cow;

use crate::{
    Query, QueryError, Value,
    dialect::{Dialect, DialectExt},
    error::Result,
    placeholder::{ESCAPED_PLACEHOLDER, PARAM_MARKER, PLACEHOLDER},
    profiling::quill_profile_scope,
    trace::{quill_trace_render, quill_trace_render_error},
};

/// What rendering does with a query whose templates and arguments disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImbalancePolicy {
    /// Panic with the imbalance message. A malformed template can never
    /// succeed on retry.
    #[default]
    Abort,
    /// Return the imbalance as an `Err`, like any data error.
    Report,
}

/// SQL text and bound parameters produced by one render call.
///
/// `params` is empty for [`Dialect::Raw`], whose values are inlined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Rendered {
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Rendering configuration: the target dialect, the marker to rewrite and
/// the imbalance policy.
///
/// ```ignore
/// let renderer = Renderer::new(Dialect::PostgreSQL);
/// let rendered = renderer.render_query(&query)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    dialect: Dialect,
    marker: Cow<'static, str>,
    imbalance: ImbalancePolicy,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Renderer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            marker: Cow::Borrowed(PARAM_MARKER),
            imbalance: ImbalancePolicy::default(),
        }
    }

    /// Replaces the parameter marker this renderer looks for.
    ///
    /// Queries built by this crate always use [`PARAM_MARKER`]; a custom
    /// marker is for text produced elsewhere.
    ///
    /// # Panics
    /// If the marker is empty or contains `?`.
    pub fn with_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        let marker = marker.into();
        assert!(
            !marker.is_empty() && !marker.contains(PLACEHOLDER),
            "parameter marker must be non-empty and must not contain `?`: {marker:?}"
        );
        self.marker = marker;
        self
    }

    pub fn with_imbalance_policy(mut self, policy: ImbalancePolicy) -> Self {
        self.imbalance = policy;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn imbalance_policy(&self) -> ImbalancePolicy {
        self.imbalance
    }

    /// Flattens and renders a query.
    ///
    /// Errors collected while building the query are joined into one and
    /// returned instead of any text. Under [`ImbalancePolicy::Abort`] a
    /// placeholder imbalance panics.
    pub fn render_query(&self, query: &Query) -> Result<Rendered> {
        let flat = query.flatten();
        if let Some(error) = QueryError::join(flat.errors) {
            if self.imbalance == ImbalancePolicy::Abort && error.is_programmer_error() {
                panic!("{error}");
            }
            quill_trace_render_error!(self.dialect, error);
            return Err(error);
        }
        self.render(&flat.text, flat.params)
    }

    /// Renders already flattened text against its ordered parameters.
    pub fn render(&self, text: &str, params: Vec<Value>) -> Result<Rendered> {
        quill_profile_scope!("render");

        let markers = text.matches(self.marker.as_ref()).count();
        if markers != params.len() {
            let error = QueryError::ParamCountMismatch {
                markers,
                params: params.len(),
            };
            quill_trace_render_error!(self.dialect, error);
            return Err(error);
        }

        let sql = match self.substitute(text, &params) {
            Ok(sql) => sql,
            Err(error) => {
                quill_trace_render_error!(self.dialect, error);
                return Err(error);
            }
        };
        quill_trace_render!(self.dialect, sql, params.len());

        let params = if self.dialect.binds_parameters() {
            params
        } else {
            Vec::new()
        };
        Ok(Rendered { sql, params })
    }

    fn substitute(&self, text: &str, params: &[Value]) -> Result<String> {
        let marker = self.marker.as_bytes();
        let bytes = text.as_bytes();
        let mut sql = String::with_capacity(text.len());
        let mut index = 0usize;
        let mut run = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'?' && bytes.get(i + 1) == Some(&b'?') {
                sql.push_str(&text[run..i]);
                sql.push(PLACEHOLDER);
                i += ESCAPED_PLACEHOLDER.len();
                run = i;
            } else if bytes[i..].starts_with(marker) {
                sql.push_str(&text[run..i]);
                self.write_param(&mut sql, index, &params[index])?;
                index += 1;
                i += marker.len();
                run = i;
            } else {
                i += 1;
            }
        }
        sql.push_str(&text[run..]);
        Ok(sql)
    }

    fn write_param(&self, sql: &mut String, index: usize, value: &Value) -> Result<()> {
        match self.dialect {
            Dialect::Raw => {
                let literal = value
                    .to_literal()
                    .ok_or(QueryError::UnsupportedRawType(value.type_name()))?;
                sql.push_str(&literal);
            }
            Dialect::Unknown => sql.push_str(&self.marker),
            dialect => {
                if let Some(placeholder) = dialect.render_placeholder(index + 1) {
                    sql.push_str(&placeholder);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "{{TEST_TOKEN}}";

    fn pg() -> Renderer {
        Renderer::new(Dialect::PostgreSQL).with_marker(TOKEN)
    }

    fn ints(n: usize) -> Vec<Value> {
        (0..n as i64).map(Value::I64).collect()
    }

    #[test]
    fn numbering_positions() {
        let cases = [
            ("", "", 0),
            ("no tokens", "no tokens", 0),
            ("{{TEST_TOKEN}} front token", "$1 front token", 1),
            ("boundary{{TEST_TOKEN}} token", "boundary$1 token", 1),
            ("end token{{TEST_TOKEN}}", "end token$1", 1),
            (
                "several {{TEST_TOKEN}} the token {{TEST_TOKEN}}",
                "several $1 the token $2",
                2,
            ),
            (
                "{{TEST_TOKEN}}{{TEST_TOKEN}}adjacent {{TEST_TOKEN}}{{TEST_TOKEN}} tokens {{TEST_TOKEN}}{{TEST_TOKEN}}",
                "$1$2adjacent $3$4 tokens $5$6",
                6,
            ),
        ];
        for (text, want, n) in cases {
            let rendered = pg().render(text, ints(n)).unwrap();
            assert_eq!(rendered.sql, want, "input: {text:?}");
            assert_eq!(rendered.params.len(), n);
        }
    }

    #[test]
    fn escapes_unescaped_in_same_pass() {
        let text = format!("a ?? b = {PARAM_MARKER}??{PARAM_MARKER}");
        let rendered = Renderer::new(Dialect::PostgreSQL)
            .render(&text, ints(2))
            .unwrap();
        assert_eq!(rendered.sql, "a ? b = $1?$2");

        let rendered = Renderer::new(Dialect::Sql).render(&text, ints(2)).unwrap();
        assert_eq!(rendered.sql, "a ? b = ???");
    }

    #[test]
    fn raw_values_are_not_rescanned() {
        let text = format!("a = {PARAM_MARKER}");
        let rendered = Renderer::new(Dialect::Raw)
            .render(&text, vec![Value::from("why??")])
            .unwrap();
        assert_eq!(rendered.sql, "a = 'why??'");
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn unknown_dialect_is_identity() {
        let rendered = Renderer::new(Dialect::Unknown)
            .render("test-sql", vec![])
            .unwrap();
        assert_eq!(rendered.sql, "test-sql");

        let text = format!("x = {PARAM_MARKER}");
        let rendered = Renderer::new(Dialect::Unknown)
            .render(&text, ints(1))
            .unwrap();
        assert_eq!(rendered.sql, text);
        assert_eq!(rendered.params, ints(1));
    }

    #[test]
    fn raw_rejects_unsupported_types() {
        let text = format!("a = {PARAM_MARKER}");
        let err = Renderer::new(Dialect::Raw)
            .render(&text, vec![Value::Bytes(vec![1, 2])])
            .unwrap_err();
        assert_eq!(err, QueryError::UnsupportedRawType("bytes"));
        assert_eq!(err.to_string(), "unsupported type for raw query: bytes");
    }

    #[test]
    fn count_mismatch() {
        let text = format!("a = {PARAM_MARKER}");
        let err = Renderer::default().render(&text, vec![]).unwrap_err();
        assert_eq!(
            err,
            QueryError::ParamCountMismatch {
                markers: 1,
                params: 0
            }
        );
    }

    #[test]
    #[should_panic(expected = "must not contain")]
    fn marker_with_placeholder_is_rejected() {
        let _ = Renderer::default().with_marker("$?");
    }
}
