//! Error types for Quack operations.
//!
//! The fakes themselves never fail; these errors surface from the typed
//! helpers around them (row access, record downcasts, fabrication, call-log
//! serialization).

use std::fmt;

/// The primary error type for Quack helpers.
#[derive(Debug)]
pub enum Error {
    /// Type conversion or downcast errors
    Type(TypeError),
    /// A model could not be built from its placeholder row
    Fabrication(FabricationError),
    /// Serialization/deserialization errors
    Serde(String),
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
}

#[derive(Debug)]
pub struct FabricationError {
    /// Type name of the entity being fabricated
    pub entity: &'static str,
    /// Sequence number that was requested
    pub seq: usize,
    pub source: Box<Error>,
}

impl Error {
    /// Shorthand for a type error without column context.
    pub fn type_mismatch(expected: &'static str, actual: impl Into<String>) -> Self {
        Error::Type(TypeError {
            expected,
            actual: actual.into(),
            column: None,
        })
    }

    /// Is this a type/downcast error?
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Type(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::Fabrication(e) => write!(
                f,
                "Could not fabricate {} (seq {}): {}",
                e.entity, e.seq, e.source
            ),
            Error::Serde(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fabrication(e) => Some(e.source.as_ref()),
            _ => None,
        }
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err.to_string())
    }
}

/// Result type alias for Quack helpers.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn type_error_display_with_column() {
        let err = Error::Type(TypeError {
            expected: "i64",
            actual: "TEXT".to_string(),
            column: Some("id".to_string()),
        });
        assert_eq!(
            err.to_string(),
            "Type error in column 'id': expected i64, found TEXT"
        );
        assert!(err.is_type_error());
    }

    #[test]
    fn fabrication_error_exposes_source() {
        let err = Error::Fabrication(FabricationError {
            entity: "User",
            seq: 3,
            source: Box::new(Error::type_mismatch("i64", "TEXT")),
        });
        assert_eq!(
            err.to_string(),
            "Could not fabricate User (seq 3): Type error: expected i64, found TEXT"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn serde_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Serde(_)));
    }
}
