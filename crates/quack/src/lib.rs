//! Quack: test doubles for ORM sessions and queries.
//!
//! Write persistence code against [`SessionApi`] / [`QueryApi`], then hand it a
//! [`FakeSession`] in tests. The fake builds chainable [`FakeQuery`]s,
//! fabricates entities for `all`/`first`/`get`/`one`, records every call and
//! lets the test override any operation.
//!
//! # Quick Start
//!
//! ```rust
//! use quack::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct User;
//! fabricate_default!(User);
//!
//! fn active_users(session: &impl SessionApi) -> Vec<Record> {
//!     match session.query(entities![User]).filter_by(args![active = true]) {
//!         Chained::Query(q) => q.all(),
//!         Chained::Value(_) => Vec::new(),
//!     }
//! }
//!
//! let session = FakeSession::new();
//! let users = active_users(&session);
//! assert_eq!(users.len(), 10);
//! assert!(users.iter().all(|r| r.is::<User>()));
//!
//! let q = session.mock_queries()[0].clone();
//! q.mock_attr("filter_by").assert_called_once_with(&args![active = true]);
//! ```
//!
//! # Crates
//!
//! - `quack-core`: values, rows, models, entity fabrication, the API traits
//! - `quack-mock`: overridable, call-recording mock methods
//! - `quack-query`: [`FakeQuery`]
//! - `quack-session`: [`FakeSession`]

pub use quack_core::{
    CallArgs, Chained, ColumnInfo, Entities, Entity, EntityDescriptor, Error, Fabricate,
    FabricationError, FieldInfo, FromValue, MethodCall, Model, QueryApi, Record, Result, Row,
    SessionApi, SqlType, TypeError, Value, args, entities, fabricate_default, fabricate_model,
    fabricate_models, placeholder_row,
};

pub use quack_mock::{AttributeTable, MockMethod, Overridable, SideEffect};

pub use quack_query::{DEFAULT_ALL_COUNT, FakeQuery, QueryConfig};

pub use quack_session::{FakeSession, SessionConfig};

pub use regex::Regex;

/// Prelude module for convenient imports.
///
/// ```rust
/// use quack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Arguments and results
        CallArgs,
        Chained,
        Entities,
        Error,
        // Fakes
        FakeQuery,
        FakeSession,
        Fabricate,
        FieldInfo,
        MethodCall,
        MockMethod,
        Model,
        Overridable,
        QueryApi,
        QueryConfig,
        Record,
        Regex,
        Result,
        Row,
        SessionApi,
        SessionConfig,
        SqlType,
        Value,
        // Macros
        args,
        entities,
        fabricate_default,
        fabricate_models,
    };
}
