//! SQL column types and their placeholder values.

use crate::value::Value;

/// SQL column types understood by placeholder fabrication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    BigInt,
    Double,
    Boolean,
    VarChar(u32),
    Text,
    Blob,
    Timestamp,
    Uuid,
    Json,
    Array(Box<SqlType>),
    /// Custom type name; fabricated as text.
    Custom(&'static str),
}

impl SqlType {
    pub const fn is_numeric(&self) -> bool {
        matches!(self, SqlType::Integer | SqlType::BigInt | SqlType::Double)
    }

    /// Deterministic stand-in value for a column of this type.
    ///
    /// The same `(column, seq)` pair always yields the same value, so
    /// fabricated rows are reproducible across calls and test runs.
    pub fn placeholder(&self, column: &str, seq: usize) -> Value {
        let n = seq as i64;
        match self {
            SqlType::Integer => Value::Int(i32::try_from(seq).unwrap_or(i32::MAX)),
            SqlType::BigInt => Value::BigInt(n),
            SqlType::Double => Value::Double(n as f64),
            SqlType::Boolean => Value::Bool(seq % 2 == 0),
            SqlType::VarChar(len) => {
                let mut text = format!("{column}_{seq}");
                text.truncate(*len as usize);
                Value::Text(text)
            }
            SqlType::Text | SqlType::Custom(_) => Value::Text(format!("{column}_{seq}")),
            SqlType::Blob => Value::Bytes(format!("{column}_{seq}").into_bytes()),
            SqlType::Timestamp => Value::Timestamp(n * 1_000_000),
            SqlType::Uuid => {
                let mut bytes = [0u8; 16];
                bytes[8..].copy_from_slice(&(seq as u64).to_be_bytes());
                Value::Uuid(bytes)
            }
            SqlType::Json => Value::Json(serde_json::json!({ "seq": seq })),
            SqlType::Array(inner) => Value::Array(vec![inner.placeholder(column, seq)]),
        }
    }
}
