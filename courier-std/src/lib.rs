//! # courier-std
//!
//! Standard implementations for the Courier in-process message bus.
//!
//! This crate provides:
//! - **Standard hooks**: [`LoggingHook`](hooks::LoggingHook),
//!   [`CancellationHook`](hooks::CancellationHook)
//! - **Testing helpers**: counting hooks and handlers, recording listeners

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod hooks;
pub mod testing;
