//! Fragment builder and argument converter.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::{
    Arg, IntoArgs, QueryError, Value,
    placeholder::{PARAM_MARKER, PLACEHOLDER, Segment, segments},
    trace::quill_trace_fragment,
};

/// Separator written between the placeholders of an expanded collection.
pub const LIST_SEPARATOR: char = ',';

/// One unit of template text with its resolved parameters.
///
/// Every consumed `?` of the template has been replaced by
/// [`PARAM_MARKER`]; escaped `??` runs are kept as-is until rendering.
/// Fragments are immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    text: CompactString,
    params: SmallVec<[Value; 4]>,
    errors: Vec<QueryError>,
}

impl Fragment {
    /// Resolves `args` against the placeholders of `template`, left to right.
    ///
    /// Imbalance between sites and arguments is recorded as an error on the
    /// fragment, never raised here:
    /// - unmatched `?` sites stay in the text as `?` ([`QueryError::ExtraPlaceholder`])
    /// - arguments without a site are dropped ([`QueryError::MissingPlaceholder`])
    pub fn build(template: &str, args: impl IntoArgs) -> Self {
        let args = args.into_args();
        let arg_count = args.len();
        let mut fragment = Fragment {
            text: CompactString::with_capacity(template.len()),
            params: SmallVec::new(),
            errors: Vec::new(),
        };

        let mut args = args.into_iter();
        let mut unmatched = 0usize;
        for segment in segments(template) {
            match segment {
                Segment::Text(text) => fragment.text.push_str(text),
                Segment::Site => match args.next() {
                    Some(arg) => fragment.resolve(arg),
                    None => {
                        unmatched += 1;
                        fragment.text.push(PLACEHOLDER);
                    }
                },
            }
        }

        if unmatched > 0 {
            fragment.errors.push(QueryError::ExtraPlaceholder {
                template: template.into(),
                args: arg_count,
            });
        }
        if args.next().is_some() {
            fragment.errors.push(QueryError::MissingPlaceholder {
                template: template.into(),
                args: arg_count,
            });
        }

        quill_trace_fragment!(template, arg_count, fragment.errors.len());
        fragment
    }

    /// Resolves one argument against the current placeholder site.
    fn resolve(&mut self, arg: Arg) {
        match arg {
            Arg::Embed(embedder) => self.text.push_str(&embedder.raw_value()),
            Arg::Valuer(valuer) => match valuer.value() {
                Ok(value) => self.bind(value),
                Err(e) => {
                    self.errors.push(QueryError::Conversion(e.to_string()));
                    self.bind(Value::Null);
                }
            },
            Arg::List(values) if values.is_empty() => self.bind(Value::Null),
            Arg::List(values) => {
                for (i, value) in values.into_iter().enumerate() {
                    if i > 0 {
                        self.text.push(LIST_SEPARATOR);
                    }
                    self.bind(value);
                }
            }
            Arg::Query(None) => self.bind(Value::Null),
            Arg::Query(Some(query)) => {
                let nested = query.flatten();
                self.text.push_str(&nested.text);
                self.params.extend(nested.params);
                self.errors.extend(nested.errors);
            }
            Arg::Json(Ok(json)) => self.bind(Value::Text(json)),
            Arg::Json(Err(e)) => {
                self.errors.push(QueryError::Json(e));
                self.bind(Value::Null);
            }
            Arg::Embedded(text) => self.text.push_str(&text),
            Arg::Value(value) => self.bind(value),
        }
    }

    #[inline]
    fn bind(&mut self, value: Value) {
        self.text.push_str(PARAM_MARKER);
        self.params.push(value);
    }

    pub(crate) fn prefixed(mut self, separator: &str) -> Self {
        if !separator.is_empty() {
            let mut text = CompactString::with_capacity(separator.len() + self.text.len());
            text.push_str(separator);
            text.push_str(&self.text);
            self.text = text;
        }
        self
    }

    /// Text with resolved placeholders replaced by [`PARAM_MARKER`].
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn errors(&self) -> &[QueryError] {
        &self.errors
    }

    /// Returns `true` if the fragment was built without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
