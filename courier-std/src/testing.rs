//! Testing utilities for Courier.
//!
//! This module provides helpers that make asserting on bus wiring easier.
//!
//! # Features
//!
//! - [`CountingHook`]: A pre/post hook that counts calls and records order
//! - [`CountingHandler`]: A handler that counts invocations
//! - [`RecordingListener`]: A listener that records every event it receives
//! - [`FailingHook`]: A pre-dispatch hook that always fails

use courier_core::{
    BoxError, Context, Handler, Listener, Message, PostDispatchHook, PreDispatchHook,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

// ============================================================================
// Counting Hook
// ============================================================================

/// A hook that counts calls on either chain.
///
/// Clones share the same counter. An optional shared log records `id` on each
/// call, which lets a test assert ordering across several hooks.
///
/// # Example
///
/// ```rust,ignore
/// let order = Arc::new(Mutex::new(Vec::new()));
/// let first = CountingHook::with_order(1, order.clone());
/// let second = CountingHook::with_order(2, order.clone());
///
/// bus.register_pre_dispatch_hook(first.clone());
/// bus.register_pre_dispatch_hook(second.clone());
/// bus.dispatch(&mut query)?;
///
/// assert_eq!(*order.lock().unwrap(), vec![1, 2]);
/// ```
#[derive(Clone, Default)]
pub struct CountingHook {
    id: usize,
    count: Arc<AtomicUsize>,
    order: Option<Arc<Mutex<Vec<usize>>>>,
}

impl CountingHook {
    /// Create a new counting hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counting hook that pushes `id` to `order` on each call.
    pub fn with_order(id: usize, order: Arc<Mutex<Vec<usize>>>) -> Self {
        Self {
            id,
            count: Arc::new(AtomicUsize::new(0)),
            order: Some(order),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }

    fn record(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let Some(order) = &self.order {
            order.lock().unwrap().push(self.id);
        }
    }
}

impl PreDispatchHook for CountingHook {
    fn before_dispatch(&self, _ctx: &Context, _message: &dyn Message) -> Result<(), BoxError> {
        self.record();
        Ok(())
    }
}

impl PostDispatchHook for CountingHook {
    fn after_dispatch(
        &self,
        _ctx: &Context,
        outcome: Result<(), BoxError>,
        _message: &dyn Message,
    ) -> Result<(), BoxError> {
        self.record();
        outcome
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations for any message type.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// bus.register_handler::<GetUser, _>(counter.clone());
///
/// bus.dispatch(&mut GetUser::default())?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<M: Message> Handler<M> for CountingHandler {
    fn handle(&self, _ctx: &Context, _message: &mut M) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all events it receives.
///
/// Useful for verifying fan-out.
pub struct RecordingListener<E: Clone> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Clone> RecordingListener<E> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Clone> Default for RecordingListener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for RecordingListener<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E: Message + Clone> Listener<E> for RecordingListener<E> {
    fn on_event(&self, _ctx: &Context, event: &E) -> Result<(), BoxError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Failing Hook
// ============================================================================

/// The error produced by [`FailingHook`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("injected failure: {0}")]
pub struct InjectedFailure(pub String);

/// A pre-dispatch hook that always fails with [`InjectedFailure`].
#[derive(Debug, Clone)]
pub struct FailingHook {
    reason: String,
}

impl FailingHook {
    /// Create a hook failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PreDispatchHook for FailingHook {
    fn before_dispatch(&self, _ctx: &Context, _message: &dyn Message) -> Result<(), BoxError> {
        Err(Box::new(InjectedFailure(self.reason.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Ping(u8);
    impl Message for Ping {}

    #[test]
    fn test_counting_hook_shares_state() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let hook = CountingHook::with_order(7, order.clone());
        let clone = hook.clone();

        hook.before_dispatch(&Context::background(), &Ping(0)).unwrap();
        clone
            .after_dispatch(&Context::background(), Ok(()), &Ping(0))
            .unwrap();

        assert_eq!(hook.count(), 2);
        assert_eq!(*order.lock().unwrap(), vec![7, 7]);
        hook.reset();
        assert_eq!(clone.count(), 0);
    }

    #[test]
    fn test_recording_listener() {
        let listener = RecordingListener::new();
        listener.on_event(&Context::background(), &Ping(1)).unwrap();
        listener.on_event(&Context::background(), &Ping(2)).unwrap();

        assert_eq!(listener.events(), vec![Ping(1), Ping(2)]);
        listener.clear();
        assert_eq!(listener.count(), 0);
    }

    #[test]
    fn test_failing_hook() {
        let err = FailingHook::new("nope")
            .before_dispatch(&Context::background(), &Ping(0))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<InjectedFailure>(),
            Some(&InjectedFailure("nope".into()))
        );
    }
}
