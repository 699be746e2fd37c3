//! # courier-core
//!
//! Core traits for the Courier in-process message bus.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that provide handlers, hooks or listeners without depending on the bus
//! itself.
//!
//! # Building Blocks
//!
//! ## [`Message`]
//!
//! Any `Send + Sync + 'static` value routed by its concrete type. A message
//! carries its request fields in and, after dispatch, its response fields out.
//!
//! ## [`Handler`]
//!
//! The single endpoint for a message type. Registering another handler for
//! the same type replaces the first.
//!
//! ## [`PreDispatchHook`] / [`PostDispatchHook`]
//!
//! Ordered observers around every dispatch. Post-dispatch hooks thread the
//! handler's outcome and may rewrite it.
//!
//! ## [`Listener`]
//!
//! One of many consumers of a published event, run in registration order.
//!
//! ## [`Context`]
//!
//! Cancellation, deadline and value carrier passed through untouched.
//! Context-less callables are adapted with [`WithoutContext`].
//!
//! # Error Types
//!
//! - [`BusError`] - Dispatch, publish and transaction errors
//! - [`ContextError`] - Cancellation and deadline reasons

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]
#![deny(unknown_or_malformed_diagnostic_attributes)]

mod context;
mod error;
mod handler;
mod hook;
mod listener;
mod message;
mod transaction;

// Re-exports
pub use context::{CancelHandle, Context};
pub use error::{BoxError, BusError, ContextError};
pub use handler::{Handler, WithoutContext};
pub use hook::{PostDispatchHook, PreDispatchHook};
pub use listener::Listener;
pub use message::{AsAnyMessage, Message};
pub use transaction::{NoopTransactionManager, TransactionManager, Work};
