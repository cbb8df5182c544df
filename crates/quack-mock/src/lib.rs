//! Overridable, call-recording mock methods.
//!
//! `quack-mock` is the **mocking layer** the fakes are built on. It has no
//! notion of sessions or queries; any type can use it to expose a method
//! with a computed default that tests can override on demand.
//!
//! # Pieces
//!
//! - [`MockMethod`]: records calls, holds an optional return value and side
//!   effect, and exposes the usual assertions.
//! - [`Overridable`]: a per-instance field that lazily owns one `MockMethod`
//!   and calls back into the owner's default when nothing is configured.
//! - [`AttributeTable`]: mock methods created on demand by name, for
//!   operations that are not declared ahead of time.
//!
//! # Example
//!
//! ```rust
//! use quack_mock::Overridable;
//!
//! struct Inventory {
//!     stock: u32,
//!     count: Overridable<(), u32>,
//! }
//!
//! impl Inventory {
//!     fn count(&self) -> u32 {
//!         self.count.invoke((), |()| self.stock)
//!     }
//! }
//!
//! let inv = Inventory { stock: 3, count: Overridable::new("count") };
//! assert_eq!(inv.count(), 3);
//! inv.count.handle().set_return_value(0);
//! assert_eq!(inv.count(), 0);
//! inv.count.handle().assert_called();
//! ```

pub mod attributes;
pub mod method;
pub mod overridable;

pub use attributes::AttributeTable;
pub use method::{MockMethod, SideEffect};
pub use overridable::Overridable;
