//! The session and query surface that code under test is written against.
//!
//! Production code that takes `impl SessionApi` (or `impl QueryApi`) accepts
//! the fakes from `quack-session` / `quack-query` unchanged. Only the subset
//! of a real ORM surface that tests exercise is described here: chainable
//! operations all funnel through [`QueryApi::call`], terminal operations
//! produce [`Record`]s.

use crate::call::CallArgs;
use crate::entity::{Entities, Record};
use crate::value::Value;

/// Result of a chainable query operation.
///
/// By default a chained call hands back the query itself so calls can be
/// strung together; a test can replace that with a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Chained<Q> {
    /// The query the operation was invoked on.
    Query(Q),
    /// A value configured by the test.
    Value(Value),
}

impl<Q> Chained<Q> {
    pub fn is_query(&self) -> bool {
        matches!(self, Chained::Query(_))
    }

    pub fn query(self) -> Option<Q> {
        match self {
            Chained::Query(q) => Some(q),
            Chained::Value(_) => None,
        }
    }

    pub fn as_query(&self) -> Option<&Q> {
        match self {
            Chained::Query(q) => Some(q),
            Chained::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Chained::Value(v) => Some(v),
            Chained::Query(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Chained::Value(v) => Some(v),
            Chained::Query(_) => None,
        }
    }
}

impl<Q: QueryApi> Chained<Q> {
    /// Continue the chain with another operation.
    ///
    /// A `Value` link ends the chain: it is returned unchanged and nothing is
    /// recorded.
    pub fn call(self, name: &str, args: CallArgs) -> Chained<Q> {
        match self {
            Chained::Query(q) => q.call(name, args),
            value @ Chained::Value(_) => value,
        }
    }
}

/// The faked subset of an ORM query.
pub trait QueryApi: Sized {
    /// Invoke any chainable operation by name.
    fn call(&self, name: &str, args: CallArgs) -> Chained<Self>;

    /// All matching results.
    fn all(&self) -> Vec<Record>;

    /// The first result, if any.
    fn first(&self) -> Option<Record>;

    /// Look up a result by primary key.
    fn get(&self, key: impl Into<Value>) -> Option<Record>;

    /// Exactly one result.
    fn one(&self) -> Option<Record>;

    fn filter(&self, args: CallArgs) -> Chained<Self> {
        self.call("filter", args)
    }

    fn filter_by(&self, args: CallArgs) -> Chained<Self> {
        self.call("filter_by", args)
    }

    fn join(&self, args: CallArgs) -> Chained<Self> {
        self.call("join", args)
    }

    fn outerjoin(&self, args: CallArgs) -> Chained<Self> {
        self.call("outerjoin", args)
    }

    fn order_by(&self, args: CallArgs) -> Chained<Self> {
        self.call("order_by", args)
    }

    fn group_by(&self, args: CallArgs) -> Chained<Self> {
        self.call("group_by", args)
    }

    fn having(&self, args: CallArgs) -> Chained<Self> {
        self.call("having", args)
    }

    fn options(&self, args: CallArgs) -> Chained<Self> {
        self.call("options", args)
    }

    fn limit(&self, n: i64) -> Chained<Self> {
        self.call("limit", CallArgs::new().arg(n))
    }

    fn offset(&self, n: i64) -> Chained<Self> {
        self.call("offset", CallArgs::new().arg(n))
    }

    fn distinct(&self) -> Chained<Self> {
        self.call("distinct", CallArgs::new())
    }
}

/// The faked subset of an ORM session.
pub trait SessionApi {
    type Query: QueryApi;

    /// Start a query selecting `entities`.
    fn query(&self, entities: Entities) -> Self::Query;

    /// Invoke any other session operation by name.
    fn call(&self, name: &str, args: CallArgs) -> Value;

    fn add(&self, args: CallArgs) -> Value {
        self.call("add", args)
    }

    fn add_all(&self, args: CallArgs) -> Value {
        self.call("add_all", args)
    }

    fn delete(&self, args: CallArgs) -> Value {
        self.call("delete", args)
    }

    fn merge(&self, args: CallArgs) -> Value {
        self.call("merge", args)
    }

    fn refresh(&self, args: CallArgs) -> Value {
        self.call("refresh", args)
    }

    fn expunge(&self, args: CallArgs) -> Value {
        self.call("expunge", args)
    }

    fn execute(&self, args: CallArgs) -> Value {
        self.call("execute", args)
    }

    fn flush(&self) -> Value {
        self.call("flush", CallArgs::new())
    }

    fn commit(&self) -> Value {
        self.call("commit", CallArgs::new())
    }

    fn rollback(&self) -> Value {
        self.call("rollback", CallArgs::new())
    }

    fn close(&self) -> Value {
        self.call("close", CallArgs::new())
    }
}
