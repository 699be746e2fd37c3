//! Error types for Courier.
//!
//! - [`BusError`] - Errors returned by dispatch, publish and transactions
//! - [`ContextError`] - Why a [`Context`](crate::Context) is done

use thiserror::Error;

/// A boxed error type returned by handlers, hooks and listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the bus.
#[derive(Error, Debug)]
pub enum BusError {
    /// No handler is registered for the dispatched message type.
    ///
    /// Only dispatch returns this; publishing to a type without listeners
    /// succeeds.
    #[error("handler not found for message type `{message_type}`")]
    HandlerNotFound {
        /// Name of the message type that had no handler.
        message_type: &'static str,
    },

    /// A handler, hook or listener failed. The inner error is kept verbatim.
    #[error(transparent)]
    Failed(BoxError),

    /// An erased registry entry was handed a value of another type.
    ///
    /// Reserved. Entries are stored under the `TypeId` they downcast to, so
    /// dispatch and publish only return this if that invariant is broken.
    #[error("registry entry for `{expected}` received `{found}`")]
    MessageType {
        /// The type the entry was registered for.
        expected: &'static str,
        /// The type that reached it.
        found: &'static str,
    },
}

impl BusError {
    /// Returns `true` for [`BusError::HandlerNotFound`].
    pub fn is_handler_not_found(&self) -> bool {
        matches!(self, BusError::HandlerNotFound { .. })
    }

    /// Borrow the user error behind [`BusError::Failed`] as a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            BusError::Failed(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Unwrap into the user error, boxing bus-level variants.
    pub fn into_inner(self) -> BoxError {
        match self {
            BusError::Failed(inner) => inner,
            other => Box::new(other),
        }
    }
}

// A handler that `?`s a nested dispatch boxes the `BusError`; unbox it so the
// caller still sees the original variant.
impl From<BoxError> for BusError {
    fn from(err: BoxError) -> Self {
        match err.downcast::<BusError>() {
            Ok(bus) => *bus,
            Err(other) => BusError::Failed(other),
        }
    }
}

/// The reason a context is done.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context, or one of its parents, was cancelled.
    #[error("context cancelled")]
    Cancelled,

    /// The earliest deadline in the context chain has passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}
