//! Runtime record values: one materialized instance of a schema.
//!
//! Records are read-only inputs to the traversal. Construction happens in
//! whatever layer produced the data (tests, the CLI's JSON loader, an
//! embedding application); nothing here validates against a schema — the
//! splitter does that as it walks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::ScalarKind;

/// A single scalar value. Closed sum; absence is expressed as
/// `Option<Scalar>` at the column level, never as a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Boolean,
            Scalar::I32(_) => ScalarKind::Int32,
            Scalar::I64(_) => ScalarKind::Int64,
            Scalar::F32(_) => ScalarKind::Float32,
            Scalar::F64(_) => ScalarKind::Float64,
            Scalar::Str(_) => ScalarKind::Utf8,
            Scalar::Bytes(_) => ScalarKind::Binary,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
            Scalar::Str(v) => write!(f, "{v}"),
            Scalar::Bytes(v) => write!(f, "[binary {} bytes]", v.len()),
        }
    }
}

/// What a record stores for one field: a scalar (leaf), a nested record
/// (singular group), or an ordered list (repeated field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Scalar(Scalar),
    Group(Record),
    List(Vec<Value>),
}

impl Value {
    /// Short description of the value's shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Group(_) => "group",
            Value::List(_) => "list",
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(Scalar::I64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(Scalar::F64(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Group(r)
    }
}

/// One record instance: ordered `(field name, value)` entries. A field with
/// no entry is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert, for building literals in tests and loaders.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace the value for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_existing_entry() {
        let mut record = Record::new();
        record.set("DocId", 10i64);
        record.set("DocId", 20i64);
        assert_eq!(record.get("DocId"), Some(&Value::Scalar(Scalar::I64(20))));
    }

    #[test]
    fn missing_entry_is_absent() {
        let record = Record::new().with("Url", "http://A");
        assert!(record.has("Url"));
        assert!(!record.has("Code"));
        assert_eq!(record.get("Code"), None);
    }

    #[test]
    fn scalar_kinds_agree_with_schema_kinds() {
        assert_eq!(Scalar::I64(1).kind(), ScalarKind::Int64);
        assert_eq!(Scalar::Str("x".into()).kind(), ScalarKind::Utf8);
        assert_eq!(Scalar::Bool(true).kind(), ScalarKind::Boolean);
    }
}
