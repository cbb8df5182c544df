//! Dispatch table of dynamically named mock methods.

use crate::method::MockMethod;
use quack_core::{CallArgs, MethodCall};
use regex::Regex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Mock methods created on demand by name, plus an ordered log of every
/// call made through the table.
///
/// Any name is accepted. The first access creates its handle; later
/// accesses return the same one, so configuration set through
/// [`attr`](Self::attr) persists across calls.
pub struct AttributeTable<R> {
    owner: &'static str,
    methods: RefCell<BTreeMap<String, Rc<MockMethod<CallArgs, R>>>>,
    log: RefCell<Vec<MethodCall>>,
}

impl<R: Clone> AttributeTable<R> {
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            methods: RefCell::new(BTreeMap::new()),
            log: RefCell::new(Vec::new()),
        }
    }

    /// The handle for `name`, created on first access.
    pub fn attr(&self, name: &str) -> Rc<MockMethod<CallArgs, R>> {
        let mut methods = self.methods.borrow_mut();
        if let Some(method) = methods.get(name) {
            return Rc::clone(method);
        }
        tracing::trace!(owner = self.owner, attribute = name, "creating mock attribute");
        let method = Rc::new(MockMethod::new(name.to_owned()));
        methods.insert(name.to_string(), Rc::clone(&method));
        method
    }

    /// Record a call to `name` and return its configured result, if any.
    pub fn invoke(&self, name: &str, args: CallArgs) -> Option<R> {
        let method = self.attr(name);
        self.log.borrow_mut().push(MethodCall::new(name, args.clone()));
        method.intercept(&args)
    }

    /// Names accessed so far, sorted.
    pub fn accessed(&self) -> Vec<String> {
        self.methods.borrow().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }

    /// Every call made through the table, in order.
    pub fn method_calls(&self) -> Vec<MethodCall> {
        self.log.borrow().clone()
    }

    /// Calls whose method name matches `pattern`, in order.
    pub fn calls_matching(&self, pattern: &Regex) -> Vec<MethodCall> {
        self.log
            .borrow()
            .iter()
            .filter(|call| pattern.is_match(&call.name))
            .cloned()
            .collect()
    }

    /// Drop the call log and every handle (with its configuration).
    pub fn reset(&self) {
        self.methods.borrow_mut().clear();
        self.log.borrow_mut().clear();
    }
}

impl<R> std::fmt::Debug for AttributeTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeTable")
            .field("owner", &self.owner)
            .field("attributes", &self.methods.borrow().keys().collect::<Vec<_>>())
            .field("calls", &self.log.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quack_core::{Value, args};

    #[test]
    fn attr_is_stable_per_name() {
        let table: AttributeTable<Value> = AttributeTable::new("test");
        let a = table.attr("filter");
        let b = table.attr("filter");
        let c = table.attr("join");
        assert!(Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(a.name(), "filter");
        assert_eq!(table.accessed(), vec!["filter", "join"]);
    }

    #[test]
    fn invoke_records_and_respects_overrides() {
        let table: AttributeTable<Value> = AttributeTable::new("test");
        assert_eq!(table.invoke("filter", args![1]), None);

        table.attr("filter").set_return_value(Value::from("fixed"));
        assert_eq!(table.invoke("filter", args![2]), Some(Value::from("fixed")));
        assert_eq!(table.invoke("filter", args![3]), Some(Value::from("fixed")));

        let filter = table.attr("filter");
        assert_eq!(filter.call_count(), 3);
        filter.assert_called_with(&args![3]);
    }

    #[test]
    fn log_keeps_order_across_names() {
        let table: AttributeTable<Value> = AttributeTable::new("test");
        table.invoke("filter_by", args![active = true]);
        table.invoke("join", args!["users"]);
        table.invoke("filter", args![]);

        let names: Vec<String> = table.method_calls().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["filter_by", "join", "filter"]);

        let filters = table.calls_matching(&Regex::new("^filter").unwrap());
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].args, args![active = true]);
    }

    #[test]
    fn reset_forgets_configuration() {
        let table: AttributeTable<Value> = AttributeTable::new("test");
        table.attr("one").set_return_value(Value::Null);
        table.invoke("one", args![]);
        table.reset();
        assert!(!table.contains("one"));
        assert!(table.method_calls().is_empty());
        assert_eq!(table.invoke("one", args![]), None);
    }

    #[test]
    fn generated_names_are_owned_by_their_handles() {
        let table: AttributeTable<Value> = AttributeTable::new("test");
        let handles: Vec<_> = (0..3).map(|i| table.attr(&format!("col_{i}"))).collect();
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.name(), format!("col_{i}"));
            assert_eq!(Rc::strong_count(handle), 2);
        }

        table.reset();
        assert!(handles.iter().all(|handle| Rc::strong_count(handle) == 1));
        assert!(table.accessed().is_empty());
    }
}
