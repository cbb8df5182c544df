//! Core types and traits for Quack.
//!
//! This crate provides the vocabulary shared by the fakes:
//!
//! - `Value`, `Row`, `FieldInfo`, `SqlType` and the `Model` trait
//! - `Entities` / `Fabricate` for describing and fabricating query results
//! - `CallArgs` / `MethodCall` for recorded calls
//! - `QueryApi` / `SessionApi`, the surface code under test is written against

pub mod api;
pub mod call;
pub mod entity;
pub mod error;
pub mod field;
pub mod model;
pub mod row;
pub mod types;
pub mod value;

pub use api::{Chained, QueryApi, SessionApi};
pub use call::{CallArgs, MethodCall};
pub use entity::{
    Entities, Entity, EntityDescriptor, Fabricate, Record, fabricate_model, placeholder_row,
};
pub use error::{Error, FabricationError, Result, TypeError};
pub use field::FieldInfo;
pub use model::Model;
pub use row::{ColumnInfo, FromValue, Row};
pub use types::SqlType;
pub use value::Value;
