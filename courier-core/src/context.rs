//! # Call Context
//!
//! A [`Context`] travels with every dispatch and publish. The bus never looks
//! inside it: it is handed unchanged to every context-aware handler, hook and
//! listener, and a fresh background context is supplied when the caller does
//! not provide one.
//!
//! Contexts form an immutable chain. Each `with_*` call returns a new child
//! that shares its parent, so cloning is a reference-count bump.
//!
//! # What a context carries
//!
//! - **Values**: one value per type, looked up innermost first
//! - **Cancellation**: [`Context::with_cancel`] returns a [`CancelHandle`];
//!   cancelling a parent is visible from every descendant
//! - **Deadlines**: the earliest deadline in the chain applies
//!
//! # Example
//!
//! ```rust
//! use courier_core::Context;
//! use std::time::Duration;
//!
//! struct RequestId(u64);
//!
//! let (ctx, cancel) = Context::background()
//!     .with_value(RequestId(7))
//!     .with_timeout(Duration::from_secs(30))
//!     .with_cancel();
//!
//! assert_eq!(ctx.value::<RequestId>().map(|id| id.0), Some(7));
//! assert!(!ctx.is_cancelled());
//!
//! cancel.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use crate::error::ContextError;
use std::{
    any::{Any, TypeId},
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

enum Scope {
    Value {
        type_id: TypeId,
        value: Box<dyn Any + Send + Sync>,
    },
    Cancel(Arc<AtomicBool>),
    Deadline(Instant),
}

struct Node {
    parent: Option<Arc<Node>>,
    scope: Scope,
}

// Unlink the chain iteratively so dropping a deep context cannot overflow the
// stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Arc::try_unwrap(parent) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An opaque carrier of cancellation, deadline and request-scoped values.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// An empty root context. Never cancelled, no deadline, no values.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been layered onto this context.
    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }

    fn push(&self, scope: Scope) -> Self {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                scope,
            })),
        }
    }

    fn scopes(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
            .map(|node| &node.scope)
    }

    /// Derive a child carrying `value`. A later value of the same type shadows
    /// an earlier one.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        self.push(Scope::Value {
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        })
    }

    /// Look up the innermost value of type `T`.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.scopes().find_map(|scope| match scope {
            Scope::Value { type_id, value } if *type_id == TypeId::of::<T>() => {
                value.downcast_ref::<T>()
            }
            _ => None,
        })
    }

    /// Derive a cancellable child.
    ///
    /// Cancelling the returned handle marks the child and all contexts derived
    /// from it as cancelled. The parent is unaffected.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = self.push(Scope::Cancel(flag.clone()));
        (ctx, CancelHandle { flag })
    }

    /// Derive a child that is done once `deadline` has passed.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.push(Scope::Deadline(deadline))
    }

    /// Derive a child that is done `timeout` from now.
    ///
    /// A timeout too large to represent as an [`Instant`] never expires and
    /// leaves the context unchanged.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    /// The earliest deadline in the chain, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.scopes()
            .filter_map(|scope| match scope {
                Scope::Deadline(at) => Some(*at),
                _ => None,
            })
            .min()
    }

    /// Why this context is done, or `None` while it is still live.
    ///
    /// Cancellation takes precedence over an expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        let cancelled = self.scopes().any(|scope| match scope {
            Scope::Cancel(flag) => flag.load(Ordering::Acquire),
            _ => false,
        });
        if cancelled {
            return Some(ContextError::Cancelled);
        }
        match self.deadline() {
            Some(at) if Instant::now() >= at => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Returns `true` once the context is cancelled or past its deadline.
    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.scopes().count())
            .field("deadline", &self.deadline())
            .field("err", &self.err())
            .finish()
    }
}

/// Cancels the context it was created with.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the associated context. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct UserId(u64);

    #[derive(Debug, PartialEq)]
    struct TraceId(&'static str);

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.is_background());
        assert!(!ctx.is_cancelled());
        assert_eq!(ctx.deadline(), None);
        assert_eq!(ctx.value::<UserId>(), None);
    }

    #[test]
    fn test_values_shadow_and_coexist() {
        let ctx = Context::background()
            .with_value(UserId(1))
            .with_value(TraceId("abc"))
            .with_value(UserId(2));

        assert_eq!(ctx.value::<UserId>(), Some(&UserId(2)));
        assert_eq!(ctx.value::<TraceId>(), Some(&TraceId("abc")));
        assert!(!ctx.is_background());
    }

    #[test]
    fn test_parent_cancel_reaches_child() {
        let (parent, cancel) = Context::background().with_cancel();
        let child = parent.with_value(UserId(1));

        assert!(!child.is_cancelled());
        cancel.cancel();
        assert!(cancel.is_cancelled());
        assert_eq!(child.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn test_child_cancel_leaves_parent() {
        let (parent, _parent_cancel) = Context::background().with_cancel();
        let (child, cancel) = parent.with_cancel();

        cancel.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let now = Instant::now();
        let late = now + Duration::from_secs(60);
        let early = now + Duration::from_secs(5);

        let ctx = Context::background().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = Context::background().with_deadline(Instant::now());
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));

        let (ctx, cancel) = ctx.with_cancel();
        cancel.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn test_unbounded_timeout_never_expires() {
        let ctx = Context::background().with_timeout(Duration::MAX);
        assert_eq!(ctx.deadline(), None);
        assert_eq!(ctx.err(), None);
        assert!(ctx.is_background());

        let bounded = Context::background().with_timeout(Duration::from_secs(60));
        let ctx = bounded.with_timeout(Duration::MAX);
        assert_eq!(ctx.deadline(), bounded.deadline());
    }

    #[test]
    fn test_deep_chain_drops() {
        let mut ctx = Context::background();
        for i in 0..100_000u64 {
            ctx = ctx.with_value(i);
        }
        assert_eq!(ctx.value::<u64>(), Some(&99_999));
        drop(ctx);
    }

    #[test]
    fn test_drop_keeps_shared_parent() {
        let parent = Context::background().with_value(UserId(1));
        let mut child = parent.with_cancel().0;
        for i in 0..1_000u64 {
            child = child.with_value(i);
        }
        drop(child);
        assert_eq!(parent.value::<UserId>(), Some(&UserId(1)));
    }
}
