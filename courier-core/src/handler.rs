//! # Handler
//!
//! The single endpoint bound to a message type. A handler receives the
//! message mutably so it can fill in response fields the caller reads after
//! dispatch returns.
//!
//! # Shapes
//!
//! 1. **Context-aware closure**: `|ctx: &Context, msg: &mut M| { ... }`
//! 2. **Context-less closure**: wrapped in [`WithoutContext`]
//! 3. **Struct implementation**: `impl Handler<M> for MyHandler`
//!
//! All three end up as a `Handler<M>` that always receives a [`Context`], so
//! the dispatch path never branches on shape.

use crate::{context::Context, error::BoxError, message::Message};

/// The terminal endpoint for a dispatched message.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle messages of type `{M}`",
    label = "missing `Handler<{M}>` implementation",
    note = "Handlers are `Fn(&Context, &mut {M}) -> Result<(), BoxError>` or implement `handle`."
)]
pub trait Handler<M: Message>: Send + Sync + 'static {
    /// Handle `message`, optionally writing a response into it.
    fn handle(&self, ctx: &Context, message: &mut M) -> Result<(), BoxError>;
}

// Blanket impl for context-aware closures
impl<M, F> Handler<M> for F
where
    M: Message,
    F: Fn(&Context, &mut M) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn handle(&self, ctx: &Context, message: &mut M) -> Result<(), BoxError> {
        (self)(ctx, message)
    }
}

/// Adapts a callable that ignores the context to the context-aware form.
///
/// Implements [`Handler`], [`PreDispatchHook`], [`PostDispatchHook`] and
/// [`Listener`] for the matching context-less closure shapes.
///
/// [`PreDispatchHook`]: crate::PreDispatchHook
/// [`PostDispatchHook`]: crate::PostDispatchHook
/// [`Listener`]: crate::Listener
#[derive(Clone, Copy)]
pub struct WithoutContext<F>(F);

impl<F> WithoutContext<F> {
    /// Wrap a context-less callable.
    pub const fn new(f: F) -> Self {
        Self(f)
    }

    /// Borrow the wrapped callable.
    pub fn inner(&self) -> &F {
        &self.0
    }
}

impl<F> std::fmt::Debug for WithoutContext<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WithoutContext")
            .field(&std::any::type_name::<F>())
            .finish()
    }
}

impl<M, F> Handler<M> for WithoutContext<F>
where
    M: Message,
    F: Fn(&mut M) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn handle(&self, _ctx: &Context, message: &mut M) -> Result<(), BoxError> {
        (self.0)(message)
    }
}
