//! The model trait fabrication builds on.
//!
//! Quack never persists anything, so a model only has to describe its
//! columns and build itself from a row; [`placeholder_row`] supplies that
//! row.
//!
//! [`placeholder_row`]: crate::placeholder_row

use crate::Result;
use crate::field::FieldInfo;
use crate::row::Row;

/// A table-backed type that fake queries can fabricate.
///
/// # Example
///
/// ```rust
/// use quack_core::{FieldInfo, Model, Result, Row, SqlType, placeholder_row};
///
/// struct Hero {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for Hero {
///     const TABLE_NAME: &'static str = "heroes";
///
///     fn fields() -> &'static [FieldInfo] {
///         static FIELDS: &[FieldInfo] = &[
///             FieldInfo::new("id", "id", SqlType::BigInt).primary_key(true),
///             FieldInfo::new("name", "name", SqlType::Text),
///         ];
///         FIELDS
///     }
///
///     fn from_row(row: &Row) -> Result<Self> {
///         Ok(Self {
///             id: row.get_named("id")?,
///             name: row.get_named("name")?,
///         })
///     }
/// }
///
/// let hero = Hero::from_row(&placeholder_row::<Hero>(0)).unwrap();
/// assert_eq!(hero.id, 1);
/// assert_eq!(hero.name, "name_0");
/// ```
pub trait Model: Sized {
    /// Table name, reported when fabrication fails.
    const TABLE_NAME: &'static str;

    /// Column metadata, in declaration order.
    fn fields() -> &'static [FieldInfo];

    /// Build an instance from a row holding every column in [`Model::fields`].
    fn from_row(row: &Row) -> Result<Self>;
}
