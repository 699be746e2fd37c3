//! # Event Listener
//!
//! One of possibly many consumers of an event type. Unlike a [`Handler`],
//! listeners never replace each other and receive the event immutably:
//! publishing is a fan-out, not a request/response.
//!
//! [`Handler`]: crate::Handler

use crate::{context::Context, error::BoxError, handler::WithoutContext, message::Message};

/// A consumer of published events of type `E`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for `{E}`",
    label = "missing `Listener<{E}>` implementation",
    note = "Listeners are `Fn(&Context, &{E}) -> Result<(), BoxError>` or implement `on_event`."
)]
pub trait Listener<E: Message>: Send + Sync + 'static {
    /// React to a published event.
    fn on_event(&self, ctx: &Context, event: &E) -> Result<(), BoxError>;
}

impl<E, F> Listener<E> for F
where
    E: Message,
    F: Fn(&Context, &E) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn on_event(&self, ctx: &Context, event: &E) -> Result<(), BoxError> {
        (self)(ctx, event)
    }
}

impl<E, F> Listener<E> for WithoutContext<F>
where
    E: Message,
    F: Fn(&E) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn on_event(&self, _ctx: &Context, event: &E) -> Result<(), BoxError> {
        (self.inner())(event)
    }
}
