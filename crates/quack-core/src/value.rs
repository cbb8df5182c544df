//! Dynamic values passed through the fakes.

use serde::{Deserialize, Serialize};

/// A dynamically-typed value.
///
/// Carries recorded call arguments, the keys handed to `get`, the columns of
/// placeholder rows, and canned results of chained calls. Serializes so call
/// logs can be dumped as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent argument or nullable column; also the default result of
    /// session operations.
    Null,
    Bool(bool),
    /// `INTEGER` columns.
    Int(i32),
    /// `BIGINT` columns and integer keys.
    BigInt(i64),
    Double(f64),
    Text(String),
    /// `BLOB` columns.
    Bytes(Vec<u8>),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
    Uuid([u8; 16]),
    Json(serde_json::Value),
    /// `ARRAY` columns: one placeholder element per fabricated row.
    Array(Vec<Value>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Column type name, used in type error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::BigInt(_) => "BIGINT",
            Value::Double(_) => "DOUBLE",
            Value::Text(_) => "TEXT",
            Value::Bytes(_) => "BLOB",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Uuid(_) => "UUID",
            Value::Json(_) => "JSON",
            Value::Array(_) => "ARRAY",
        }
    }

    /// Booleans, or integers read as `!= 0`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            Value::Int(n) => Some(n != 0),
            Value::BigInt(n) => Some(n != 0),
            _ => None,
        }
    }

    /// Any integer-like value widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Bool(b) => Some(i64::from(b)),
            Value::Int(n) => Some(i64::from(n)),
            Value::BigInt(n) | Value::Timestamp(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

value_from!(bool => Bool, i32 => Int, i64 => BigInt, f64 => Double, String => Text);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

/// `None` becomes `Null`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
