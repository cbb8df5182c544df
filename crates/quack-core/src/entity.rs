//! Entity descriptors and fabricated entities.
//!
//! A fake query remembers which entity types it was asked to select (its
//! [`Entities`]) and, when a result is requested, fabricates fresh instances
//! of those types through [`Fabricate`]. Results are handed back as
//! type-erased [`Record`]s that can be checked with `is::<T>()` and
//! downcast with `get::<T>()`.

use crate::Result;
use crate::error::{Error, FabricationError};
use crate::model::Model;
use crate::row::{ColumnInfo, Row};
use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// Types that a fake query can fabricate.
///
/// `seq` is the position of the item in the fabricated result; the same
/// `seq` must always produce an equivalent value.
pub trait Fabricate: Any {
    fn fabricate(seq: usize) -> Self
    where
        Self: Sized;
}

/// Build a deterministic placeholder row for `M` from its field metadata.
///
/// Numeric primary key columns get `seq + 1` (never zero),
/// nullable columns still receive a value, and every other column gets the
/// placeholder of its SQL type.
pub fn placeholder_row<M: Model>(seq: usize) -> Row {
    let fields = M::fields();
    let columns = Rc::new(ColumnInfo::from_fields(fields));
    let values = fields
        .iter()
        .map(|field| {
            if field.primary_key && field.sql_type.is_numeric() {
                field.sql_type.placeholder(field.column_name, seq + 1)
            } else {
                field.sql_type.placeholder(field.column_name, seq)
            }
        })
        .collect();
    Row::with_columns(columns, values)
}

/// Fabricate a model by running `M::from_row` over its placeholder row.
pub fn fabricate_model<M: Model>(seq: usize) -> Result<M> {
    let row = placeholder_row::<M>(seq);
    M::from_row(&row).map_err(|source| {
        tracing::debug!(table = M::TABLE_NAME, seq, error = %source, "Placeholder row rejected");
        Error::Fabrication(FabricationError {
            entity: std::any::type_name::<M>(),
            seq,
            source: Box::new(source),
        })
    })
}

/// Describes one entity type a query selects.
///
/// Equality is by type identity.
#[derive(Clone, Copy)]
pub struct EntityDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    fabricate: fn(usize) -> Entity,
}

impl EntityDescriptor {
    pub fn of<T: Fabricate>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            fabricate: fabricate_entity::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fabricate a fresh instance of the described type.
    pub fn fabricate(&self, seq: usize) -> Entity {
        (self.fabricate)(seq)
    }
}

fn fabricate_entity<T: Fabricate>(seq: usize) -> Entity {
    Entity::new(T::fabricate(seq))
}

impl PartialEq for EntityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityDescriptor {}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// The ordered entity types a query selects: none, one, or several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities(Vec<EntityDescriptor>);

impl Entities {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn of<T: Fabricate>() -> Self {
        Self(vec![EntityDescriptor::of::<T>()])
    }

    /// Append another entity type (builder pattern).
    #[must_use]
    pub fn and<T: Fabricate>(mut self) -> Self {
        self.0.push(EntityDescriptor::of::<T>());
        self
    }

    pub fn push(&mut self, descriptor: EntityDescriptor) {
        self.0.push(descriptor);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(EntityDescriptor::type_name).collect()
    }

    /// Fabricate one record: one fresh entity per descriptor, in order.
    pub fn fabricate(&self, seq: usize) -> Record {
        Record::new(self.0.iter().map(|d| d.fabricate(seq)).collect())
    }
}

impl From<EntityDescriptor> for Entities {
    fn from(descriptor: EntityDescriptor) -> Self {
        Self(vec![descriptor])
    }
}

impl From<Vec<EntityDescriptor>> for Entities {
    fn from(descriptors: Vec<EntityDescriptor>) -> Self {
        Self(descriptors)
    }
}

impl FromIterator<EntityDescriptor> for Entities {
    fn from_iter<I: IntoIterator<Item = EntityDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One fabricated (or canned) value, type-erased.
///
/// Clones share the underlying value; equality is identity.
#[derive(Clone)]
pub struct Entity {
    type_name: &'static str,
    value: Rc<dyn Any>,
}

impl Entity {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Rc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Is this entity an instance of `T`?
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn same(&self, other: &Entity) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fake {}>", self.type_name)
    }
}

/// One result item produced by a fake query.
///
/// Holds one entity per selected entity type, in descriptor order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entities: Vec<Entity>,
}

impl Record {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Wrap an arbitrary canned value, e.g. to configure a return value.
    pub fn of<T: Any>(value: T) -> Self {
        Self::new(vec![Entity::new(value)])
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when this record is a single entity of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        matches!(self.entities.as_slice(), [only] if only.is::<T>())
    }

    /// First entity of type `T`, if any.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entities.iter().find_map(Entity::downcast_ref::<T>)
    }

    /// Entity at `index`, if it is a `T`.
    pub fn at<T: Any>(&self, index: usize) -> Option<&T> {
        self.entities.get(index).and_then(Entity::downcast_ref::<T>)
    }

    pub fn try_get<T: Any>(&self) -> Result<&T> {
        self.get::<T>().ok_or_else(|| {
            let actual = self
                .entities
                .iter()
                .map(Entity::type_name)
                .collect::<Vec<_>>()
                .join(", ");
            Error::type_mismatch(std::any::type_name::<T>(), format!("({actual})"))
        })
    }

    /// Does each entity match the descriptor at the same position?
    pub fn matches(&self, entities: &Entities) -> bool {
        self.entities.len() == entities.len()
            && self
                .entities
                .iter()
                .zip(entities.iter())
                .all(|(entity, descriptor)| Any::type_id(&*entity.value) == descriptor.type_id())
    }
}

/// Build an [`Entities`] list from types.
///
/// ```rust
/// use quack_core::{entities, fabricate_default};
///
/// #[derive(Default)]
/// struct User;
/// #[derive(Default)]
/// struct Address;
/// fabricate_default!(User, Address);
///
/// let entities = entities![User, Address];
/// assert_eq!(entities.len(), 2);
/// assert!(entities![].is_empty());
/// ```
#[macro_export]
macro_rules! entities {
    () => {
        $crate::Entities::none()
    };
    ($($ty:ty),+ $(,)?) => {
        $crate::Entities::none()$(.and::<$ty>())+
    };
}

/// Implement [`Fabricate`] for `Default` types (every item is `T::default()`).
#[macro_export]
macro_rules! fabricate_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Fabricate for $ty {
                fn fabricate(_seq: usize) -> Self {
                    <$ty as ::std::default::Default>::default()
                }
            }
        )+
    };
}

/// Implement [`Fabricate`] for [`Model`] types via [`fabricate_model`].
///
/// The generated impl panics if the model's `from_row` rejects its own
/// placeholder row, which means the model metadata and `from_row` disagree.
#[macro_export]
macro_rules! fabricate_models {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Fabricate for $ty {
                fn fabricate(seq: usize) -> Self {
                    match $crate::fabricate_model::<$ty>(seq) {
                        Ok(model) => model,
                        Err(err) => panic!("{err}"),
                    }
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldInfo, SqlType};

    #[derive(Debug, Default, PartialEq)]
    struct Tag;

    #[derive(Debug, PartialEq)]
    struct Hero {
        id: i64,
        name: String,
        age: Option<i32>,
    }

    impl Model for Hero {
        const TABLE_NAME: &'static str = "heroes";

        fn fields() -> &'static [FieldInfo] {
            static FIELDS: &[FieldInfo] = &[
                FieldInfo::new("id", "id", SqlType::BigInt).primary_key(true),
                FieldInfo::new("name", "name", SqlType::Text),
                FieldInfo::new("age", "age", SqlType::Integer).nullable(true),
            ];
            FIELDS
        }

        fn from_row(row: &Row) -> Result<Self> {
            Ok(Self {
                id: row.get_named("id")?,
                name: row.get_named("name")?,
                age: row.get_named("age")?,
            })
        }
    }

    struct Broken;

    impl Model for Broken {
        const TABLE_NAME: &'static str = "broken";

        fn fields() -> &'static [FieldInfo] {
            &[]
        }

        fn from_row(row: &Row) -> Result<Self> {
            let _: i64 = row.get_named("missing")?;
            Ok(Self)
        }
    }

    fabricate_default!(Tag);
    fabricate_models!(Hero);

    #[test]
    fn placeholder_row_follows_field_metadata() {
        let row = placeholder_row::<Hero>(2);
        assert_eq!(row.get_named::<i64>("id").unwrap(), 3);
        assert_eq!(row.get_named::<String>("name").unwrap(), "name_2");
        assert_eq!(row.get_named::<Option<i32>>("age").unwrap(), Some(2));
    }

    #[test]
    fn fabricate_model_is_deterministic() {
        let a = fabricate_model::<Hero>(4).unwrap();
        let b = fabricate_model::<Hero>(4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 5);
    }

    #[test]
    fn fabricate_model_reports_failures() {
        match fabricate_model::<Broken>(0) {
            Err(Error::Fabrication(e)) => {
                assert!(e.entity.ends_with("Broken"));
                assert_eq!(e.seq, 0);
            }
            Err(other) => panic!("expected fabrication error, got {other:?}"),
            Ok(_) => panic!("expected fabrication error"),
        }
    }

    #[test]
    fn descriptors_compare_by_type() {
        assert_eq!(EntityDescriptor::of::<Hero>(), EntityDescriptor::of::<Hero>());
        assert_ne!(EntityDescriptor::of::<Hero>(), EntityDescriptor::of::<Tag>());
        assert!(EntityDescriptor::of::<Hero>().type_name().ends_with("Hero"));
    }

    #[test]
    fn entities_preserve_order() {
        let entities = entities![Hero, Tag];
        assert_eq!(entities.len(), 2);
        assert!(entities.names()[0].ends_with("Hero"));
        assert!(entities.names()[1].ends_with("Tag"));
        assert_eq!(entities, Entities::of::<Hero>().and::<Tag>());
        assert!(entities![].is_empty());
    }

    #[test]
    fn fabricated_record_matches_descriptors() {
        let entities = entities![Hero, Tag];
        let record = entities.fabricate(0);
        assert!(record.matches(&entities));
        assert!(!record.is::<Hero>());
        assert_eq!(record.at::<Hero>(0).map(|h| h.id), Some(1));
        assert!(record.at::<Tag>(1).is_some());
        assert!(record.at::<Tag>(0).is_none());
    }

    #[test]
    fn single_record_is_instance() {
        let record = Entities::of::<Hero>().fabricate(7);
        assert!(record.is::<Hero>());
        assert!(!record.is::<Tag>());
        assert_eq!(record.get::<Hero>().map(|h| h.name.as_str()), Some("name_7"));
    }

    #[test]
    fn try_get_reports_actual_types() {
        let record = Record::of("test");
        assert_eq!(record.get::<&str>(), Some(&"test"));
        let err = record.try_get::<Hero>().unwrap_err();
        assert!(err.is_type_error());
        assert!(err.to_string().contains("&str"));
    }

    #[test]
    fn entity_equality_is_identity() {
        let a = Entity::new(Tag);
        let b = Entity::new(Tag);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}"), format!("<fake {}>", std::any::type_name::<Tag>()));
    }
}
