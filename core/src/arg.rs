//! Typed query arguments.
//!
//! Every argument passed alongside template text becomes an [`Arg`]. The
//! closed variants cover the kinds the builder knows how to expand; caller
//! types plug in through the [`Embedder`] and [`Valuer`] capabilities and the
//! [`IntoArg`] conversion.

use compact_str::CompactString;
use core::fmt;
use serde::Serialize;

use crate::{Query, Value, error::ValueError};

/// Embeds a value directly into the query text.
///
/// The returned text is spliced verbatim and is never bound, so it must only
/// come from a vetted set (column names, table names, sort directions).
pub trait Embedder: Send + Sync {
    fn raw_value(&self) -> String;
}

/// Produces a single bound value through a fallible conversion.
///
/// A failure is recorded on the fragment; sibling arguments still resolve.
pub trait Valuer: Send + Sync {
    fn value(&self) -> Result<Value, ValueError>;
}

/// One argument of a template, in resolution precedence order.
pub enum Arg {
    /// Caller type that splices raw text
    Embed(Box<dyn Embedder>),
    /// Caller type with a fallible conversion to one bound value
    Valuer(Box<dyn Valuer>),
    /// Expands to one placeholder per element
    List(Vec<Value>),
    /// Nested query spliced in place; `None` binds a single NULL
    Query(Option<Query>),
    /// JSON text of a structured value, or the encoding error
    Json(Result<String, String>),
    /// Trusted literal SQL text
    Embedded(CompactString),
    /// Plain scalar bound to one placeholder
    Value(Value),
}

impl Arg {
    /// Boxes an [`Embedder`] implementor.
    pub fn embed(embedder: impl Embedder + 'static) -> Self {
        Arg::Embed(Box::new(embedder))
    }

    /// Boxes a [`Valuer`] implementor.
    pub fn valuer(valuer: impl Valuer + 'static) -> Self {
        Arg::Valuer(Box::new(valuer))
    }

    /// Binds any value convertible into [`Value`].
    pub fn value(value: impl Into<Value>) -> Self {
        Arg::Value(value.into())
    }

    /// Encodes a serializable value as JSON text.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        Arg::Json(serde_json::to_string(value).map_err(|e| e.to_string()))
    }

    /// Expands a collection into one placeholder per element.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Arg::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Embed(embedder) => f.debug_tuple("Embed").field(&embedder.raw_value()).finish(),
            Arg::Valuer(_) => f.debug_tuple("Valuer").field(&"<dyn Valuer>").finish(),
            Arg::List(values) => f.debug_tuple("List").field(values).finish(),
            Arg::Query(query) => f.debug_tuple("Query").field(query).finish(),
            Arg::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Arg::Embedded(text) => f.debug_tuple("Embedded").field(text).finish(),
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

//------------------------------------------------------------------------------
// Argument wrapper types
//------------------------------------------------------------------------------

/// Literal SQL text embedded directly into the query.
///
/// Like [`Embedder`], this is not to be used for untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Embedded(pub CompactString);

impl Embedded {
    pub fn new(text: impl Into<CompactString>) -> Self {
        Self(text.into())
    }
}

/// A collection bound as one array parameter instead of being spread into
/// one placeholder per element.
///
/// ```ignore
/// let ids = Folded::new([1, 2, 3]);
/// Query::new("id = ANY(?)", (ids,)); // id = ANY($1), one array param
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folded(pub Vec<Value>);

impl Folded {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        values.into_iter().collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for Folded {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Folded(iter.into_iter().map(Into::into).collect())
    }
}

/// Wrapper for byte buffers to avoid list semantics (`Vec<u8>` normally
/// expands into one placeholder per byte).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value.0)
    }
}

/// A JSON object argument, bound as its encoded text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonMap(pub serde_json::Map<String, serde_json::Value>);

impl JsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<serde_json::Value>> FromIterator<(K, V)> for JsonMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        JsonMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A JSON array argument, bound as its encoded text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonList(pub Vec<serde_json::Value>);

impl<V: Into<serde_json::Value>> FromIterator<V> for JsonList {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        JsonList(iter.into_iter().map(Into::into).collect())
    }
}

/// Any serializable value bound as its JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

//------------------------------------------------------------------------------
// IntoArg
//------------------------------------------------------------------------------

/// Conversion into a query argument.
///
/// Implement this for caller types to pick their capability:
///
/// ```ignore
/// struct Column(&'static str);
///
/// impl Embedder for Column {
///     fn raw_value(&self) -> String {
///         self.0.to_string()
///     }
/// }
///
/// impl IntoArg for Column {
///     fn into_arg(self) -> Arg {
///         Arg::embed(self)
///     }
/// }
/// ```
pub trait IntoArg {
    fn into_arg(self) -> Arg;
}

impl IntoArg for Arg {
    #[inline]
    fn into_arg(self) -> Arg {
        self
    }
}

impl IntoArg for Value {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(self)
    }
}

macro_rules! impl_into_arg_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoArg for $ty {
                #[inline]
                fn into_arg(self) -> Arg {
                    Arg::Value(Value::from(self))
                }
            }

            impl IntoArg for Option<$ty> {
                #[inline]
                fn into_arg(self) -> Arg {
                    Arg::Value(Value::from(self))
                }
            }
        )+
    };
}

impl_into_arg_scalar!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, String,
);

impl_into_arg_scalar!(&bool, &i8, &i16, &i32, &i64, &u8, &u16, &u32, &u64, &f32, &f64);

impl IntoArg for &str {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(Value::from(self))
    }
}

impl IntoArg for Option<&str> {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(Value::from(self))
    }
}

impl IntoArg for &String {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(Value::from(self))
    }
}

impl IntoArg for std::borrow::Cow<'_, str> {
    #[inline]
    fn into_arg(self) -> Arg {
        Arg::Value(Value::from(self))
    }
}

impl IntoArg for Bytes {
    fn into_arg(self) -> Arg {
        Arg::Value(self.into())
    }
}

impl IntoArg for Folded {
    fn into_arg(self) -> Arg {
        Arg::Value(Value::Array(self.0))
    }
}

impl IntoArg for Embedded {
    fn into_arg(self) -> Arg {
        Arg::Embedded(self.0)
    }
}

impl<T: Into<Value>> IntoArg for Vec<T> {
    fn into_arg(self) -> Arg {
        Arg::list(self)
    }
}

impl<T: Into<Value>, const N: usize> IntoArg for [T; N] {
    fn into_arg(self) -> Arg {
        Arg::list(self)
    }
}

impl<T: Clone + Into<Value>> IntoArg for &[T] {
    fn into_arg(self) -> Arg {
        Arg::list(self.iter().cloned())
    }
}

impl<T: Clone + Into<Value>> IntoArg for &Vec<T> {
    fn into_arg(self) -> Arg {
        Arg::list(self.iter().cloned())
    }
}

impl IntoArg for Query {
    fn into_arg(self) -> Arg {
        Arg::Query(Some(self))
    }
}

impl IntoArg for &Query {
    fn into_arg(self) -> Arg {
        Arg::Query(Some(self.clone()))
    }
}

impl IntoArg for Option<Query> {
    fn into_arg(self) -> Arg {
        Arg::Query(self)
    }
}

impl IntoArg for JsonMap {
    fn into_arg(self) -> Arg {
        Arg::json(&self.0)
    }
}

impl IntoArg for JsonList {
    fn into_arg(self) -> Arg {
        Arg::json(&self.0)
    }
}

impl IntoArg for serde_json::Value {
    fn into_arg(self) -> Arg {
        Arg::json(&self)
    }
}

impl<T: Serialize> IntoArg for Json<T> {
    fn into_arg(self) -> Arg {
        Arg::json(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_become_values() {
        assert!(matches!(5i32.into_arg(), Arg::Value(Value::I32(5))));
        assert!(matches!("x".into_arg(), Arg::Value(Value::Text(ref s)) if s == "x"));
        assert!(matches!(None::<i64>.into_arg(), Arg::Value(Value::Null)));
    }

    #[test]
    fn collections_become_lists() {
        let Arg::List(values) = vec![1, 2, 3].into_arg() else {
            panic!("expected a list");
        };
        assert_eq!(values, vec![Value::I32(1), Value::I32(2), Value::I32(3)]);

        let names = ["a".to_string(), "b".to_string()];
        let Arg::List(values) = names.as_slice().into_arg() else {
            panic!("expected a list");
        };
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn folded_and_bytes_bind_once() {
        let Arg::Value(Value::Array(values)) = Folded::new([1u8, 2]).into_arg() else {
            panic!("expected an array value");
        };
        assert_eq!(values, vec![Value::U8(1), Value::U8(2)]);
        assert!(matches!(
            Bytes(vec![0, 1]).into_arg(),
            Arg::Value(Value::Bytes(_))
        ));
    }

    #[test]
    fn json_is_encoded_eagerly() {
        let map = JsonMap::new().with("a", 1).with("b", "two");
        let Arg::Json(Ok(text)) = map.into_arg() else {
            panic!("expected encoded json");
        };
        assert_eq!(text, r#"{"a":1,"b":"two"}"#);

        let list: JsonList = [1, 2].into_iter().collect();
        assert!(matches!(list.into_arg(), Arg::Json(Ok(ref t)) if t == "[1,2]"));
    }

    #[test]
    fn json_error_is_kept() {
        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), "tuple keys are not strings");
        assert!(matches!(Json(map).into_arg(), Arg::Json(Err(_))));
    }
}
