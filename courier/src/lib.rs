//! # courier - Synchronous In-Process Message Bus
//!
//! `courier` routes commands, queries and events inside one process, keyed
//! purely by the concrete type of the message value.
//!
//! - **Dispatch**: exactly one handler per message type. The handler may
//!   write a response into the message, which the caller reads afterwards.
//! - **Hooks**: pre- and post-dispatch chains wrap every dispatch in
//!   registration order. Post-dispatch hooks may rewrite the outcome.
//! - **Publish**: any number of listeners per event type, run in
//!   registration order; the first failure stops the fan-out.
//!
//! Everything runs synchronously on the caller's thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use courier::{BoxError, Bus, Message};
//!
//! #[derive(Default)]
//! struct GetUser {
//!     id: u64,
//!     name: Option<String>,
//! }
//! impl Message for GetUser {}
//!
//! struct UserSignedIn {
//!     id: u64,
//! }
//! impl Message for UserSignedIn {}
//!
//! let mut bus = Bus::new();
//! bus.add_handler(|query: &mut GetUser| -> Result<(), BoxError> {
//!     query.name = Some(format!("user-{}", query.id));
//!     Ok(())
//! });
//! bus.add_event_listener(|event: &UserSignedIn| -> Result<(), BoxError> {
//!     assert_eq!(event.id, 7);
//!     Ok(())
//! });
//!
//! let mut query = GetUser { id: 7, ..Default::default() };
//! bus.dispatch(&mut query)?;
//! assert_eq!(query.name.as_deref(), Some("user-7"));
//!
//! bus.publish(&UserSignedIn { id: 7 })?;
//! # Ok::<(), courier::BusError>(())
//! ```
//!
//! ## Telling "not implemented" apart
//!
//! ```rust
//! use courier::{Bus, BusError, Message};
//!
//! struct DeleteEverything;
//! impl Message for DeleteEverything {}
//!
//! let bus = Bus::new();
//! match bus.dispatch(&mut DeleteEverything) {
//!     Err(BusError::HandlerNotFound { .. }) => { /* e.g. 501 Not Implemented */ }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Function endpoints
//!
//! With the `macros` feature, `#[handler]` and `#[listener]` turn a plain
//! function into a registrable unit struct. The message is the last
//! parameter and may be preceded by the context.
//!
//! ```rust
//! use courier::{BoxError, Bus, Context, Message};
//!
//! #[derive(Default)]
//! struct Ping {
//!     pong: bool,
//! }
//! impl Message for Ping {}
//!
//! #[courier_macros::handler]
//! fn ping(_ctx: &Context, msg: &mut Ping) -> Result<(), BoxError> {
//!     msg.pong = true;
//!     Ok(())
//! }
//!
//! #[courier_macros::listener(name = "PingAudit")]
//! fn audit(_msg: &Ping) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {
//!     let mut bus = Bus::new();
//!     bus.register_handler::<Ping, _>(ping);
//!     bus.register_event_listener::<Ping, _>(PingAudit);
//!
//!     let mut msg = Ping::default();
//!     bus.dispatch(&mut msg).unwrap();
//!     assert!(msg.pong);
//! }
//! ```
//!
//! Dispatch is synchronous, so `async` functions are rejected:
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::handler]
//! async fn ping(_msg: &mut Ping) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```
//!
//! A handler takes its message mutably:
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::handler]
//! fn ping(_msg: &Ping) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```
//!
//! A listener takes its event by shared reference:
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::listener]
//! fn ping(_msg: &mut Ping) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```
//!
//! Only `(message)` and `(ctx, message)` are accepted:
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::handler]
//! fn ping() -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::handler]
//! fn ping(_ctx: &Context, _msg: &mut Ping, _extra: u8) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```
//!
//! `name` is the only attribute key:
//!
//! ```compile_fail
//! use courier::{BoxError, Context, Message};
//!
//! struct Ping;
//! impl Message for Ping {}
//!
//! #[courier_macros::handler(prio = 1)]
//! fn ping(_msg: &mut Ping) -> Result<(), BoxError> {
//!     Ok(())
//! }
//!
//! fn main() {}
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;

pub use bus::Bus;

pub use courier_core::{
    // Message
    AsAnyMessage,
    // Error types
    BoxError,
    BusError,
    // Context
    CancelHandle,
    Context,
    ContextError,
    // Handler
    Handler,
    // Listener
    Listener,
    Message,
    // Transactions
    NoopTransactionManager,
    // Hooks
    PostDispatchHook,
    PreDispatchHook,
    TransactionManager,
    WithoutContext,
    Work,
};

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Bus
        Bus,
        BusError,
        // Context
        Context,
        // Core traits
        Handler,
        Listener,
        Message,
        PostDispatchHook,
        PreDispatchHook,
    };
}

#[cfg(feature = "macros")]
pub use courier_macros::{Message, handler, listener};
