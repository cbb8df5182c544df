//! Chainable fake query.
//!
//! `FakeQuery` stands in for an ORM query in unit tests:
//!
//! - any chainable operation (`filter`, `join`, or a name nobody declared)
//!   returns the query itself, so chains of any length work;
//! - `all`, `first`, `get` and `one` fabricate fresh entities of the types
//!   the query was created for;
//! - every operation records its calls and can be overridden by the test.
//!
//! # Example
//!
//! ```rust
//! use quack_core::{QueryApi, args, entities, fabricate_default};
//! use quack_query::FakeQuery;
//!
//! #[derive(Default)]
//! struct User;
//! fabricate_default!(User);
//!
//! let q = FakeQuery::of(entities![User]);
//! let users = q.filter_by(args![active = true]).query().unwrap().all();
//! assert_eq!(users.len(), 10);
//! assert!(users.iter().all(|r| r.is::<User>()));
//!
//! q.mock_first().set_return_value(None);
//! assert!(q.first().is_none());
//! ```

pub mod config;

pub use config::{DEFAULT_ALL_COUNT, QueryConfig};

use quack_core::{CallArgs, Chained, Entities, MethodCall, QueryApi, Record, Result, Value};
use quack_mock::{AttributeTable, MockMethod, Overridable};
use regex::Regex;
use std::fmt;
use std::rc::Rc;

struct QueryState {
    entities: Entities,
    config: QueryConfig,
    all: Overridable<(), Vec<Record>>,
    first: Overridable<(), Option<Record>>,
    get: Overridable<Value, Option<Record>>,
    one: Overridable<(), Option<Record>>,
    attributes: AttributeTable<Value>,
}

/// A fake ORM query.
///
/// Cloning is cheap and yields the *same* query: clones share recorded calls
/// and overrides, and compare equal. Two separately created queries are never
/// equal, even when they select the same entities.
#[derive(Clone)]
pub struct FakeQuery {
    inner: Rc<QueryState>,
}

impl FakeQuery {
    /// A query with no entities; results come from the configured return
    /// values only.
    pub fn new() -> Self {
        Self::with_config(Entities::none(), QueryConfig::default())
    }

    pub fn of(entities: impl Into<Entities>) -> Self {
        Self::with_config(entities.into(), QueryConfig::default())
    }

    pub fn with_config(entities: Entities, config: QueryConfig) -> Self {
        tracing::debug!(
            entities = ?entities.names(),
            all_count = config.all_count,
            "Creating fake query"
        );
        Self {
            inner: Rc::new(QueryState {
                entities,
                config,
                all: Overridable::new("all"),
                first: Overridable::new("first"),
                get: Overridable::new("get"),
                one: Overridable::new("one"),
                attributes: AttributeTable::new("query"),
            }),
        }
    }

    /// The entity types this query selects, in order.
    pub fn entities(&self) -> &Entities {
        &self.inner.entities
    }

    pub fn config(&self) -> QueryConfig {
        self.inner.config
    }

    /// Are `self` and `other` the same query?
    pub fn is(&self, other: &FakeQuery) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn mock_all(&self) -> &MockMethod<(), Vec<Record>> {
        self.inner.all.handle()
    }

    pub fn mock_first(&self) -> &MockMethod<(), Option<Record>> {
        self.inner.first.handle()
    }

    /// Handle for `get`; its recorded arguments are the requested keys.
    pub fn mock_get(&self) -> &MockMethod<Value, Option<Record>> {
        self.inner.get.handle()
    }

    pub fn mock_one(&self) -> &MockMethod<(), Option<Record>> {
        self.inner.one.handle()
    }

    /// Handle for the chainable operation `name`.
    ///
    /// Setting a return value makes every later call to `name` produce
    /// `Chained::Value` instead of the query.
    pub fn mock_attr(&self, name: &str) -> Rc<MockMethod<CallArgs, Value>> {
        self.inner.attributes.attr(name)
    }

    /// Every chainable call made on this query, in order.
    pub fn method_calls(&self) -> Vec<MethodCall> {
        self.inner.attributes.method_calls()
    }

    pub fn calls_matching(&self, pattern: &Regex) -> Vec<MethodCall> {
        self.inner.attributes.calls_matching(pattern)
    }

    /// Names of the chainable operations used so far, sorted.
    pub fn accessed_attributes(&self) -> Vec<String> {
        self.inner.attributes.accessed()
    }

    /// The chain log as pretty-printed JSON.
    pub fn call_log_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.method_calls())?)
    }

    fn fabricate_one(&self) -> Option<Record> {
        if self.inner.entities.is_empty() {
            return None;
        }
        Some(self.inner.entities.fabricate(0))
    }
}

impl Default for FakeQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryApi for FakeQuery {
    fn call(&self, name: &str, args: CallArgs) -> Chained<Self> {
        match self.inner.attributes.invoke(name, args) {
            Some(value) => {
                tracing::trace!(operation = name, "chained call overridden");
                Chained::Value(value)
            }
            None => Chained::Query(self.clone()),
        }
    }

    fn all(&self) -> Vec<Record> {
        self.inner.all.invoke((), |()| {
            let entities = &self.inner.entities;
            if entities.is_empty() {
                return Vec::new();
            }
            let count = self.inner.config.all_count;
            tracing::debug!(entities = ?entities.names(), count, "Fabricating records");
            (0..count).map(|seq| entities.fabricate(seq)).collect()
        })
    }

    fn first(&self) -> Option<Record> {
        self.inner.first.invoke((), |()| self.fabricate_one())
    }

    fn get(&self, key: impl Into<Value>) -> Option<Record> {
        self.inner.get.invoke(key.into(), |_| self.fabricate_one())
    }

    fn one(&self) -> Option<Record> {
        self.inner.one.invoke((), |()| self.fabricate_one())
    }
}

impl PartialEq for FakeQuery {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for FakeQuery {}

impl fmt::Debug for FakeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeQuery")
            .field("id", &Rc::as_ptr(&self.inner))
            .field("entities", &self.inner.entities)
            .field("config", &self.inner.config)
            .field("attributes", &self.inner.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quack_core::{args, entities, fabricate_default};

    #[derive(Debug, Default, PartialEq)]
    struct User {
        name: String,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Address;

    fabricate_default!(User, Address);

    #[test]
    fn no_entities_returns_placeholders() {
        let q = FakeQuery::new();
        assert!(q.entities().is_empty());
        assert_eq!(q.all(), q.mock_all().return_value());
        assert!(q.all().is_empty());
        assert_eq!(q.first(), None);
        assert_eq!(q.get(1), None);
        assert_eq!(q.one(), None);
    }

    #[test]
    fn return_value_overrides_all() {
        let q = FakeQuery::new();
        let canned = vec![Record::of(User { name: "ann".into() })];
        q.mock_all().set_return_value(canned.clone());
        assert_eq!(q.all(), canned);
        assert_eq!(q.all(), canned);
        assert_eq!(q.mock_all().call_count(), 2);
    }

    #[test]
    fn all_fabricates_ten_fresh_records() {
        let q = FakeQuery::of(entities![User]);
        let first = q.all();
        let second = q.all();
        assert_eq!(first.len(), DEFAULT_ALL_COUNT);
        assert!(first.iter().all(|r| r.is::<User>()));
        // Same shape, but newly fabricated each call.
        assert!(first.iter().zip(&second).all(|(a, b)| a != b));
    }

    #[test]
    fn single_results_match_entities() {
        let q = FakeQuery::of(entities![User]);
        assert!(q.first().is_some_and(|r| r.is::<User>()));
        assert!(q.get("anything").is_some_and(|r| r.is::<User>()));
        assert!(q.one().is_some_and(|r| r.is::<User>()));
        q.mock_get().assert_called_once_with(&Value::from("anything"));
    }

    #[test]
    fn several_entities_keep_order() {
        let q = FakeQuery::of(entities![User, Address]);
        assert_eq!(q.entities().names().len(), 2);
        let record = q.first().unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.at::<User>(0).is_some());
        assert!(record.at::<Address>(1).is_some());
        assert!(record.matches(q.entities()));
    }

    #[test]
    fn all_count_is_configurable() {
        let q = FakeQuery::with_config(entities![User], QueryConfig::new().all_count(3));
        assert_eq!(q.config().all_count, 3);
        assert_eq!(q.all().len(), 3);
    }

    #[test]
    fn chained_calls_return_the_query() {
        let q = FakeQuery::of(entities![User]);
        let chained = q
            .call("a", args![])
            .call("b", args![1])
            .call("c", args![x = 2]);
        assert!(chained.as_query().is_some_and(|same| same.is(&q)));
        assert_eq!(q.filter_by(args![active = true]).query(), Some(q.clone()));
        assert_eq!(q.accessed_attributes(), vec!["a", "b", "c", "filter_by"]);
    }

    #[test]
    fn chained_override_persists() {
        let q = FakeQuery::new();
        q.mock_attr("count").set_return_value(Value::BigInt(7));
        for _ in 0..3 {
            assert_eq!(q.call("count", args![]).into_value(), Some(Value::BigInt(7)));
        }
        assert!(q.filter(args![]).is_query());
        assert_eq!(q.mock_attr("count").call_count(), 3);
    }

    #[test]
    fn clones_are_the_same_query() {
        let q = FakeQuery::new();
        let alias = q.clone();
        alias.call("join", args!["addresses"]);
        assert_eq!(alias, q);
        assert_eq!(q.method_calls().len(), 1);
        assert_ne!(q, FakeQuery::new());
    }

    #[test]
    fn call_log_filters_and_serializes() {
        let q = FakeQuery::new();
        q.filter(args![1]);
        q.order_by(args!["name"]);
        q.filter_by(args![active = true]);

        let filters = q.calls_matching(&Regex::new("^filter").unwrap());
        assert_eq!(filters.len(), 2);

        let json = q.call_log_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(3));
        assert_eq!(parsed[1]["name"], "order_by");
    }

    #[test]
    fn debug_names_entities() {
        let q = FakeQuery::of(entities![User]);
        let debug = format!("{q:?}");
        assert!(debug.starts_with("FakeQuery"));
        assert!(debug.contains("User"));
    }
}
