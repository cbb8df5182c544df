//! Recorded call arguments.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional and named arguments of one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub named: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional argument (builder pattern).
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument (builder pattern).
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Look up a named argument.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{value:?}")?;
            first = false;
        }
        for (name, value) in &self.named {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:?}")?;
            first = false;
        }
        Ok(())
    }
}

/// One entry of an ordered call log: which method, with which arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub name: String,
    pub args: CallArgs,
}

impl MethodCall {
    pub fn new(name: impl Into<String>, args: CallArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args)
    }
}

/// Build [`CallArgs`].
///
/// ```rust
/// use quack_core::{Value, args};
///
/// assert!(args![].is_empty());
/// let positional = args![1, "x"];
/// let named = args![active = true];
/// let both = args![1; active = true, age = 3];
///
/// assert_eq!(named.named("active"), Some(&Value::Bool(true)));
/// assert_eq!(both.named("age"), Some(&Value::Int(3)));
/// assert_ne!(positional, both);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::CallArgs::new()
    };
    ($($key:ident = $val:expr),+ $(,)?) => {
        $crate::CallArgs::new()$(.kwarg(stringify!($key), $val))+
    };
    ($($arg:expr),+ ; $($key:ident = $val:expr),+ $(,)?) => {
        $crate::CallArgs::new()$(.arg($arg))+$(.kwarg(stringify!($key), $val))+
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::CallArgs::new()$(.arg($arg))+
    };
}
