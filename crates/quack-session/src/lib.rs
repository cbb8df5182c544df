//! Recording fake session.
//!
//! `FakeSession` stands in for an ORM session. Its main job is handing out
//! [`FakeQuery`]s and remembering them, so a test can drive the code under
//! test and then inspect exactly which queries it built and how it chained
//! them.
//!
//! # Behavior
//!
//! - **Query creation**: every `query(..)` builds a new, distinct query and
//!   appends it to the history. Once the test overrides `query` through
//!   [`FakeSession::mock_query`], the configured query is returned instead
//!   and the history stops growing.
//! - **Other operations** (`add`, `commit`, ...): recorded, return
//!   `Value::Null` unless overridden through [`FakeSession::mock_attr`].
//!
//! # Example
//!
//! ```rust
//! use quack_core::{QueryApi, SessionApi, args, entities, fabricate_default};
//! use quack_session::FakeSession;
//!
//! #[derive(Default)]
//! struct User;
//! fabricate_default!(User);
//!
//! let session = FakeSession::new();
//! let q = session.query(entities![User]);
//! let users = q.filter_by(args![active = true]).query().unwrap().all();
//! assert_eq!(users.len(), 10);
//! assert!(session.mock_queries()[0].is(&q));
//! ```

use quack_core::{CallArgs, Entities, MethodCall, SessionApi, Value};
use quack_mock::{AttributeTable, MockMethod, Overridable};
use quack_query::{FakeQuery, QueryConfig};
use regex::Regex;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Session Configuration
// ============================================================================

/// Configuration for a fake session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Configuration handed to every query the session creates.
    pub query: QueryConfig,
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query configuration (builder pattern).
    #[must_use]
    pub fn query(mut self, config: QueryConfig) -> Self {
        self.query = config;
        self
    }

    /// Set how many records `all()` fabricates on created queries (builder
    /// pattern).
    #[must_use]
    pub fn all_count(mut self, count: usize) -> Self {
        self.query = self.query.all_count(count);
        self
    }
}

// ============================================================================
// Fake Session
// ============================================================================

/// A fake ORM session.
pub struct FakeSession {
    config: SessionConfig,
    query: Overridable<Entities, FakeQuery>,
    queries: RefCell<Vec<FakeQuery>>,
    attributes: AttributeTable<Value>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        tracing::debug!(all_count = config.query.all_count, "Creating fake session");
        Self {
            config,
            query: Overridable::new("query"),
            queries: RefCell::new(Vec::new()),
            attributes: AttributeTable::new("session"),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Handle for `query`; its recorded arguments are the requested
    /// entities.
    pub fn mock_query(&self) -> &MockMethod<Entities, FakeQuery> {
        self.query.handle()
    }

    /// Snapshot of every query this session created, in creation order.
    ///
    /// Queries returned by an override are not included. The handles are
    /// shared with the session, so configuring one affects later use of it.
    pub fn mock_queries(&self) -> Vec<FakeQuery> {
        self.queries.borrow().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }

    /// Handle for the session operation `name` (`add`, `commit`, ...).
    pub fn mock_attr(&self, name: &str) -> Rc<MockMethod<CallArgs, Value>> {
        self.attributes.attr(name)
    }

    /// Every session operation other than `query`, in order.
    pub fn method_calls(&self) -> Vec<MethodCall> {
        self.attributes.method_calls()
    }

    pub fn calls_matching(&self, pattern: &Regex) -> Vec<MethodCall> {
        self.attributes.calls_matching(pattern)
    }

    fn create_query(&self, entities: &Entities) -> FakeQuery {
        let query = FakeQuery::with_config(entities.clone(), self.config.query);
        let mut queries = self.queries.borrow_mut();
        queries.push(query.clone());
        tracing::trace!(history = queries.len(), "Recorded fake query");
        query
    }
}

impl Default for FakeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionApi for FakeSession {
    type Query = FakeQuery;

    #[tracing::instrument(level = "debug", skip_all, fields(entities = ?entities.names()))]
    fn query(&self, entities: Entities) -> FakeQuery {
        self.query.invoke(entities, |entities| self.create_query(entities))
    }

    fn call(&self, name: &str, args: CallArgs) -> Value {
        self.attributes.invoke(name, args).unwrap_or(Value::Null)
    }
}

impl std::fmt::Debug for FakeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeSession")
            .field("config", &self.config)
            .field("queries", &self.query_count())
            .field("query", &self.query)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quack_core::{QueryApi, args, entities, fabricate_default};

    #[derive(Debug, Default)]
    struct User;

    fabricate_default!(User);

    #[test]
    fn successive_queries_are_distinct() {
        let s = FakeSession::new();
        let q1 = s.query(Entities::none());
        let q2 = s.query(Entities::none());
        assert!(!q1.is(&q2));
    }

    #[test]
    fn history_keeps_creation_order() {
        let s = FakeSession::new();
        let q1 = s.query(entities![User]);
        let q2 = s.query(entities![User]);
        let history = s.mock_queries();
        assert_eq!(history.len(), 2);
        assert!(history[0].is(&q1));
        assert!(history[1].is(&q2));
    }

    #[test]
    fn history_snapshot_survives_new_queries() {
        let s = FakeSession::new();
        let first = s.query(entities![User]);
        let history = s.mock_queries();
        let again = s.query(entities![User]);

        assert_eq!(history.len(), 1);
        assert!(history[0].is(&first));
        assert!(!again.is(&first));
        assert_eq!(s.query_count(), 2);
        assert!(s.mock_queries()[1].is(&again));
    }

    #[test]
    fn unset_query_placeholder_is_stable() {
        let s = FakeSession::new();
        let placeholder = s.mock_query().return_value();
        assert!(placeholder.is(&s.mock_query().return_value()));
        assert!(!s.mock_query().has_return_value());

        let created = s.query(entities![User]);
        assert!(!created.is(&placeholder));
        assert_eq!(s.query_count(), 1);
    }

    #[test]
    fn override_stops_history() {
        let s = FakeSession::new();
        s.query(Entities::none());
        let fixed = FakeQuery::new();
        s.mock_query().set_return_value(fixed.clone());

        assert!(s.query(entities![User]).is(&fixed));
        assert!(s.query(Entities::none()).is(&fixed));
        assert_eq!(s.query_count(), 1);
        assert_eq!(s.mock_query().call_count(), 3);
        s.mock_query().assert_called_with(&Entities::none());
    }

    #[test]
    fn side_effect_overrides_query_creation() {
        let s = FakeSession::new();
        s.mock_query()
            .set_side_effect(|entities| FakeQuery::with_config(entities.clone(), QueryConfig::new().all_count(1)));
        let q = s.query(entities![User]);
        assert_eq!(q.all().len(), 1);
        assert_eq!(s.query_count(), 0);
    }

    #[test]
    fn created_queries_use_session_config() {
        let s = FakeSession::with_config(SessionConfig::new().all_count(4));
        assert_eq!(s.config().query.all_count, 4);
        let q = s.query(entities![User]);
        assert_eq!(q.all().len(), 4);
    }

    #[test]
    fn other_operations_record_and_default_to_null() {
        let s = FakeSession::new();
        assert_eq!(s.add(args!["hero"]), Value::Null);
        assert_eq!(s.commit(), Value::Null);
        s.mock_attr("execute").set_return_value(Value::BigInt(3));
        assert_eq!(s.execute(args!["UPDATE heroes SET age = 1"]), Value::BigInt(3));

        let names: Vec<String> = s.method_calls().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["add", "commit", "execute"]);
        s.mock_attr("commit").assert_called_once();
        assert_eq!(s.calls_matching(&Regex::new("^(add|commit)$").unwrap()).len(), 2);
        assert_eq!(s.query_count(), 0);
    }

    #[test]
    fn sessions_never_share_handles() {
        let a = FakeSession::new();
        let b = FakeSession::new();
        assert!(!std::ptr::eq(a.mock_query(), b.mock_query()));
        assert!(std::ptr::eq(a.mock_query(), a.mock_query()));
        a.mock_query().set_return_value(FakeQuery::new());
        b.query(Entities::none());
        assert_eq!(b.query_count(), 1);
    }
}
