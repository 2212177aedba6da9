//! Caller-side argument types shared by the integration tests.
#![allow(dead_code)]

use quill::error::ValueError;
use quill::{Embedder, Valuer, Value};

/// A qualified column name spliced into the query text.
pub struct Column {
    pub table: &'static str,
    pub name: &'static str,
}

impl Column {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }
}

impl Embedder for Column {
    fn raw_value(&self) -> String {
        format!("{}.{}", self.table, self.name)
    }
}

/// Sort direction, embedded as a keyword.
#[derive(Clone, Copy)]
pub enum Direction {
    Asc,
    Desc,
}

impl Embedder for Direction {
    fn raw_value(&self) -> String {
        match self {
            Direction::Asc => "ASC".to_string(),
            Direction::Desc => "DESC".to_string(),
        }
    }
}

/// A domain identifier that binds as its numeric value.
pub struct UserId(pub i64);

impl Valuer for UserId {
    fn value(&self) -> Result<Value, ValueError> {
        Ok(Value::I64(self.0))
    }
}

/// A value source that always fails.
pub struct Unavailable(pub &'static str);

impl Valuer for Unavailable {
    fn value(&self) -> Result<Value, ValueError> {
        Err(self.0.into())
    }
}
