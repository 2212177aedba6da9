use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while building or rendering a query.
///
/// Construction-time variants are collected on fragments and surface when the
/// owning query is rendered. Several errors are reported together through
/// [`QueryError::Multiple`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The template has more `?` placeholders than arguments.
    #[error("extra ? in text: {template} ({args} args)")]
    ExtraPlaceholder { template: CompactString, args: usize },

    /// More arguments were supplied than the template has `?` placeholders.
    #[error("missing ? in text: {template} ({args} args)")]
    MissingPlaceholder { template: CompactString, args: usize },

    /// A [`Valuer`](crate::Valuer) failed to produce its value
    #[error("value conversion error: {0}")]
    Conversion(String),

    /// A structured argument could not be encoded as JSON
    #[error("cannot jsonify value: {0}")]
    Json(String),

    /// Raw rendering met a value with no literal form
    #[error("unsupported type for raw query: {0}")]
    UnsupportedRawType(&'static str),

    /// Rendered text and parameter list disagree
    #[error("parameter count mismatch: {markers} markers, {params} params")]
    ParamCountMismatch { markers: usize, params: usize },

    /// A render was requested on a query that was never created
    #[error("cannot operate on an absent query")]
    AbsentQuery,

    #[error("{}", display_joined(.0))]
    Multiple(Vec<QueryError>),
}

impl QueryError {
    /// Combines collected errors into one, keeping every message.
    ///
    /// Returns `None` for an empty list and the error itself for a single one.
    pub fn join(errors: impl IntoIterator<Item = QueryError>) -> Option<QueryError> {
        let mut flat = Vec::new();
        for error in errors {
            match error {
                QueryError::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(QueryError::Multiple(flat)),
        }
    }

    /// True for mistakes in how the API was called (placeholder imbalance),
    /// as opposed to failures caused by argument data.
    pub fn is_programmer_error(&self) -> bool {
        match self {
            QueryError::ExtraPlaceholder { .. } | QueryError::MissingPlaceholder { .. } => true,
            QueryError::Multiple(errors) => errors.iter().any(QueryError::is_programmer_error),
            _ => false,
        }
    }

    /// Iterates the individual errors, flattening [`QueryError::Multiple`].
    pub fn iter(&self) -> impl Iterator<Item = &QueryError> {
        let errors = match self {
            QueryError::Multiple(errors) => errors.as_slice(),
            other => core::slice::from_ref(other),
        };
        errors.iter()
    }
}

fn display_joined(errors: &[QueryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Error type returned by [`Valuer`](crate::Valuer) implementations
pub type ValueError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
