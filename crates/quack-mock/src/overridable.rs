//! Overridable methods: a computed default that a test can replace.

use crate::method::MockMethod;
use std::cell::OnceCell;
use std::fmt;

/// An overridable method slot, declared once as a field of the owning type.
///
/// Each owning instance gets its own [`MockMethod`] handle, created the first
/// time it is needed and kept for the instance's lifetime. The owner supplies
/// the default behavior at call time, so the handle never outlives or aliases
/// the instance it belongs to.
///
/// ```rust
/// use quack_mock::{MockMethod, Overridable};
///
/// struct Clock {
///     ticks: i64,
///     now: Overridable<(), i64>,
/// }
///
/// impl Clock {
///     fn now(&self) -> i64 {
///         self.now.invoke((), |()| self.ticks)
///     }
///
///     fn mock_now(&self) -> &MockMethod<(), i64> {
///         self.now.handle()
///     }
/// }
///
/// let clock = Clock { ticks: 7, now: Overridable::new("now") };
/// assert_eq!(clock.now(), 7);
/// clock.mock_now().set_return_value(0);
/// assert_eq!(clock.now(), 0);
/// clock.mock_now().assert_called();
/// ```
pub struct Overridable<A, R> {
    name: &'static str,
    handle: OnceCell<MockMethod<A, R>>,
}

impl<A, R> Overridable<A, R>
where
    A: Clone + fmt::Debug,
    R: Clone,
{
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            handle: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The per-instance handle; created on first access.
    pub fn handle(&self) -> &MockMethod<A, R> {
        self.handle.get_or_init(|| {
            tracing::trace!(method = self.name, "creating mock handle");
            MockMethod::new(self.name)
        })
    }

    /// Has the handle been created yet?
    pub fn is_materialized(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Call through the handle, using `fallback` unless the test overrode it.
    pub fn invoke(&self, args: A, fallback: impl FnOnce(&A) -> R) -> R {
        self.handle().call_with(args, fallback)
    }
}

impl<A: fmt::Debug, R> fmt::Debug for Overridable<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle.get() {
            Some(handle) => fmt::Debug::fmt(handle, f),
            None => write!(f, "Overridable({}, untouched)", self.name),
        }
    }
}
