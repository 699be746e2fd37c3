//! # Dispatch Hooks
//!
//! Observers wrapped around every dispatch, independent of the message type.
//!
//! - [`PreDispatchHook`] runs before the handler. Returning an error aborts
//!   the dispatch: neither the handler nor any post-dispatch hook runs.
//! - [`PostDispatchHook`] runs after the handler and receives the current
//!   outcome. What it returns becomes the outcome seen by the next post-hook,
//!   so a hook can pass an error through, replace it, or suppress it.
//!
//! Hooks see the message as `&dyn Message`; use
//! [`downcast_ref`](crate::Message) to inspect a concrete type.
//!
//! The chain a callable may join is fixed by its signature, so wiring a
//! post-dispatch shaped closure into the pre-dispatch chain is rejected at
//! compile time:
//!
//! ```compile_fail
//! use courier_core::{BoxError, Message, PreDispatchHook};
//!
//! fn pre<H: PreDispatchHook>(_hook: H) {}
//!
//! pre(|outcome: Result<(), BoxError>, _msg: &dyn Message| outcome);
//! ```

use crate::{context::Context, error::BoxError, handler::WithoutContext, message::Message};

/// Runs before the handler on every dispatch.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pre-dispatch hook",
    label = "missing `PreDispatchHook` implementation",
    note = "Pre-dispatch hooks are `Fn(&Context, &dyn Message)` or `Fn(&dyn Message)` returning `Result<(), BoxError>`."
)]
pub trait PreDispatchHook: Send + Sync + 'static {
    /// Inspect the message before it reaches its handler.
    fn before_dispatch(&self, ctx: &Context, message: &dyn Message) -> Result<(), BoxError>;
}

/// Runs after the handler on every dispatch, threading the outcome.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a post-dispatch hook",
    label = "missing `PostDispatchHook` implementation",
    note = "Post-dispatch hooks are `Fn(&Context, Result<(), BoxError>, &dyn Message)` or `Fn(Result<(), BoxError>, &dyn Message)` returning `Result<(), BoxError>`."
)]
pub trait PostDispatchHook: Send + Sync + 'static {
    /// Observe or rewrite the outcome of the handler.
    fn after_dispatch(
        &self,
        ctx: &Context,
        outcome: Result<(), BoxError>,
        message: &dyn Message,
    ) -> Result<(), BoxError>;
}

impl<F> PreDispatchHook for F
where
    F: Fn(&Context, &dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn before_dispatch(&self, ctx: &Context, message: &dyn Message) -> Result<(), BoxError> {
        (self)(ctx, message)
    }
}

impl<F> PreDispatchHook for WithoutContext<F>
where
    F: Fn(&dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn before_dispatch(&self, _ctx: &Context, message: &dyn Message) -> Result<(), BoxError> {
        (self.inner())(message)
    }
}

impl<F> PostDispatchHook for F
where
    F: Fn(&Context, Result<(), BoxError>, &dyn Message) -> Result<(), BoxError>
        + Send
        + Sync
        + 'static,
{
    fn after_dispatch(
        &self,
        ctx: &Context,
        outcome: Result<(), BoxError>,
        message: &dyn Message,
    ) -> Result<(), BoxError> {
        (self)(ctx, outcome, message)
    }
}

impl<F> PostDispatchHook for WithoutContext<F>
where
    F: Fn(Result<(), BoxError>, &dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn after_dispatch(
        &self,
        _ctx: &Context,
        outcome: Result<(), BoxError>,
        message: &dyn Message,
    ) -> Result<(), BoxError> {
        (self.inner())(outcome, message)
    }
}
