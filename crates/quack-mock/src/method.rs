//! Call-recording mock method handle.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// Replacement behavior for a mocked method.
pub enum SideEffect<A, R> {
    /// Compute the result from the call arguments.
    Call(Box<dyn FnMut(&A) -> R>),
    /// Hand out one value per call, in order.
    Sequence(VecDeque<R>),
}

impl<A, R> fmt::Debug for SideEffect<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideEffect::Call(_) => f.write_str("SideEffect::Call(..)"),
            SideEffect::Sequence(values) => write!(f, "SideEffect::Sequence({} left)", values.len()),
        }
    }
}

struct MockState<A, R> {
    calls: Vec<A>,
    return_value: Option<R>,
    side_effect: Option<SideEffect<A, R>>,
    // Handed out by `return_value()` while unset; never an override.
    placeholder: Option<R>,
}

impl<A, R> Default for MockState<A, R> {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            return_value: None,
            side_effect: None,
            placeholder: None,
        }
    }
}

/// A call-recording handle for one method of one instance.
///
/// Every invocation is recorded. What it returns is decided in this order:
///
/// 1. the side effect, if one is set;
/// 2. the configured return value, if one is set;
/// 3. the fallback supplied by the owner, computed fresh on every call.
pub struct MockMethod<A, R> {
    name: Cow<'static, str>,
    state: RefCell<MockState<A, R>>,
}

impl<A, R> MockMethod<A, R>
where
    A: Clone + fmt::Debug,
    R: Clone,
{
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            state: RefCell::new(MockState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a call and run it: side effect, then return value, then
    /// `fallback`.
    pub fn call_with(&self, args: A, fallback: impl FnOnce(&A) -> R) -> R {
        match self.intercept(&args) {
            Some(result) => result,
            None => {
                tracing::trace!(method = %self.name, "mock falling back to default behavior");
                fallback(&args)
            }
        }
    }

    /// Record a call and return the configured result, if any.
    ///
    /// `None` means neither a side effect nor a return value applied and the
    /// caller should use its own default.
    pub fn intercept(&self, args: &A) -> Option<R> {
        let count = {
            let mut state = self.state.borrow_mut();
            state.calls.push(args.clone());
            state.calls.len()
        };
        tracing::trace!(method = %self.name, calls = count, args = ?args, "mock call recorded");

        if let Some(result) = self.run_side_effect(args) {
            return Some(result);
        }
        self.state.borrow().return_value.clone()
    }

    fn run_side_effect(&self, args: &A) -> Option<R> {
        // Taken out of the cell so the effect may call back into this handle.
        let effect = self.state.borrow_mut().side_effect.take()?;
        let (result, effect) = match effect {
            SideEffect::Call(mut f) => {
                let result = f(args);
                (Some(result), SideEffect::Call(f))
            }
            SideEffect::Sequence(mut values) => {
                let result = values.pop_front();
                if result.is_none() {
                    tracing::debug!(method = %self.name, "side effect sequence exhausted");
                }
                (result, SideEffect::Sequence(values))
            }
        };
        let mut state = self.state.borrow_mut();
        if state.side_effect.is_none() {
            state.side_effect = Some(effect);
        }
        result
    }

    pub fn set_return_value(&self, value: R) {
        self.state.borrow_mut().return_value = Some(value);
    }

    pub fn clear_return_value(&self) {
        self.state.borrow_mut().return_value = None;
    }

    pub fn has_return_value(&self) -> bool {
        self.state.borrow().return_value.is_some()
    }

    /// The configured return value.
    ///
    /// While unset, a placeholder `R::default()` is created on first read and
    /// handed out on every later read, until `reset()`. The placeholder does
    /// not count as a return value: calls still reach the fallback.
    pub fn return_value(&self) -> R
    where
        R: Default,
    {
        let mut state = self.state.borrow_mut();
        if let Some(value) = &state.return_value {
            return value.clone();
        }
        state.placeholder.get_or_insert_with(R::default).clone()
    }

    pub fn set_side_effect(&self, f: impl FnMut(&A) -> R + 'static) {
        self.state.borrow_mut().side_effect = Some(SideEffect::Call(Box::new(f)));
    }

    /// Return these values one per call; afterwards the return value or
    /// fallback applies again.
    pub fn set_side_effect_sequence(&self, values: impl IntoIterator<Item = R>) {
        self.state.borrow_mut().side_effect = Some(SideEffect::Sequence(values.into_iter().collect()));
    }

    pub fn clear_side_effect(&self) {
        self.state.borrow_mut().side_effect = None;
    }

    pub fn has_side_effect(&self) -> bool {
        self.state.borrow().side_effect.is_some()
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of the most recent call.
    pub fn call_args(&self) -> Option<A> {
        self.state.borrow().calls.last().cloned()
    }

    pub fn call_args_list(&self) -> Vec<A> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls, keep configuration.
    pub fn reset_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Forget recorded calls, return value and side effect.
    pub fn reset(&self) {
        *self.state.borrow_mut() = MockState::default();
    }

    pub fn assert_called(&self) {
        assert!(self.called(), "expected '{}' to have been called", self.name);
    }

    pub fn assert_not_called(&self) {
        let count = self.call_count();
        assert!(
            count == 0,
            "expected '{}' not to have been called, called {} times",
            self.name,
            count
        );
    }

    pub fn assert_called_once(&self) {
        let count = self.call_count();
        assert!(
            count == 1,
            "expected '{}' to have been called once, called {} times",
            self.name,
            count
        );
    }

    pub fn assert_called_with(&self, expected: &A)
    where
        A: PartialEq,
    {
        match self.call_args() {
            Some(actual) => assert!(
                actual == *expected,
                "expected '{}' called with {:?}, last call was {:?}",
                self.name,
                expected,
                actual
            ),
            None => panic!("expected '{}' called with {:?}, never called", self.name, expected),
        }
    }

    pub fn assert_called_once_with(&self, expected: &A)
    where
        A: PartialEq,
    {
        self.assert_called_once();
        self.assert_called_with(expected);
    }

    pub fn assert_any_call(&self, expected: &A)
    where
        A: PartialEq,
    {
        let calls = self.call_args_list();
        assert!(
            calls.iter().any(|call| call == expected),
            "expected '{}' to have a call with {:?}, calls were {:?}",
            self.name,
            expected,
            calls
        );
    }
}

impl<A: fmt::Debug, R> fmt::Debug for MockMethod<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockMethod")
            .field("name", &self.name)
            .field("calls", &state.calls.len())
            .field("return_value", &state.return_value.is_some())
            .field("side_effect", &state.side_effect)
            .finish()
    }
}
