//! Cancellation hook for context-aware dispatch.

use courier_core::{BoxError, Context, Message, PreDispatchHook};

/// A pre-dispatch hook that refuses to run handlers for a done context.
///
/// The bus never looks at the context itself. Register this hook first when
/// handlers should not start once the caller has cancelled or its deadline
/// has passed; the dispatch then fails with the
/// [`ContextError`](courier_core::ContextError).
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationHook;

impl PreDispatchHook for CancellationHook {
    fn before_dispatch(&self, ctx: &Context, _message: &dyn Message) -> Result<(), BoxError> {
        match ctx.err() {
            Some(err) => Err(Box::new(err)),
            None => Ok(()),
        }
    }
}
