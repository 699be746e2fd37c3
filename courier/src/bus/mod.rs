//! The in-process bus.
//!
//! A [`Bus`] is wired once and then served:
//!
//! 1. **Wiring** (`&mut self`): register handlers, hooks, listeners and the
//!    transaction manager.
//! 2. **Serving** (`&self`): dispatch and publish, from any number of threads
//!    once the bus is shared behind an `Arc`.
//!
//! The borrow checker keeps the phases apart, so registration can never race
//! with dispatch.

mod dispatch;
mod publish;
mod registry;
mod transaction;

use courier_core::{
    BoxError, Context, Handler, Listener, Message, NoopTransactionManager, PostDispatchHook,
    PreDispatchHook, TransactionManager, WithoutContext,
};
use registry::{HandlerRegistry, HookChain, ListenerRegistry};
use std::{any::TypeId, fmt};

/// A synchronous command, query and event bus.
///
/// - Each message type has at most one handler, reached through
///   [`dispatch`](Bus::dispatch). Registering another handler for the same
///   type replaces the previous one.
/// - Each event type has any number of listeners, reached through
///   [`publish`](Bus::publish).
/// - Pre- and post-dispatch hooks wrap every dispatch in registration order.
///
/// # Example
///
/// ```rust
/// use courier::{BoxError, Bus, Message};
///
/// #[derive(Default)]
/// struct GetGreeting {
///     name: String,
///     resp: String,
/// }
/// impl Message for GetGreeting {}
///
/// let mut bus = Bus::new();
/// bus.add_handler(|query: &mut GetGreeting| -> Result<(), BoxError> {
///     query.resp = format!("hello {}", query.name);
///     Ok(())
/// });
///
/// let mut query = GetGreeting {
///     name: "world".into(),
///     ..Default::default()
/// };
/// bus.dispatch(&mut query).unwrap();
/// assert_eq!(query.resp, "hello world");
/// ```
pub struct Bus {
    handlers: HandlerRegistry,
    listeners: ListenerRegistry,
    pre_hooks: HookChain<dyn PreDispatchHook>,
    post_hooks: HookChain<dyn PostDispatchHook>,
    transactions: Box<dyn TransactionManager>,
}

impl Bus {
    /// Create an empty bus with a no-op transaction manager.
    pub fn new() -> Self {
        Self {
            handlers: HandlerRegistry::default(),
            listeners: ListenerRegistry::default(),
            pre_hooks: HookChain::default(),
            post_hooks: HookChain::default(),
            transactions: Box::new(NoopTransactionManager),
        }
    }

    // ------------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------------

    /// Register `handler` as the sole handler for `M`.
    ///
    /// Any handler previously registered for `M` is replaced, whatever its
    /// shape. There is no duplicate-registration error.
    pub fn register_handler<M, H>(&mut self, handler: H)
    where
        M: Message,
        H: Handler<M>,
    {
        let replaced = self.handlers.insert::<M, H>(handler);

        #[cfg(feature = "tracing")]
        {
            if replaced {
                tracing::debug!(message_type = std::any::type_name::<M>(), "Replacing handler");
            } else {
                tracing::trace!(message_type = std::any::type_name::<M>(), "Registered handler");
            }
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = replaced;
        }
    }

    /// Register a handler that does not need the context.
    pub fn add_handler<M, F>(&mut self, handler: F)
    where
        M: Message,
        F: Fn(&mut M) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_handler::<M, _>(WithoutContext::new(handler));
    }

    /// Register a handler that receives the dispatch context.
    pub fn add_handler_ctx<M, F>(&mut self, handler: F)
    where
        M: Message,
        F: Fn(&Context, &mut M) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_handler::<M, _>(handler);
    }

    /// Returns `true` if a handler is registered for `M`.
    pub fn has_handler<M: Message>(&self) -> bool {
        self.handlers.contains(TypeId::of::<M>())
    }

    // ------------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------------

    /// Append a hook to the pre-dispatch chain.
    pub fn register_pre_dispatch_hook<H: PreDispatchHook>(&mut self, hook: H) {
        self.pre_hooks.push(Box::new(hook));
    }

    /// Append a context-less hook to the pre-dispatch chain.
    pub fn add_pre_dispatch_hook<F>(&mut self, hook: F)
    where
        F: Fn(&dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_pre_dispatch_hook(WithoutContext::new(hook));
    }

    /// Append a context-aware hook to the pre-dispatch chain.
    pub fn add_pre_dispatch_hook_ctx<F>(&mut self, hook: F)
    where
        F: Fn(&Context, &dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_pre_dispatch_hook(hook);
    }

    /// Append a hook to the post-dispatch chain.
    pub fn register_post_dispatch_hook<H: PostDispatchHook>(&mut self, hook: H) {
        self.post_hooks.push(Box::new(hook));
    }

    /// Append a context-less hook to the post-dispatch chain.
    ///
    /// The hook receives the current outcome and returns the next one.
    pub fn add_post_dispatch_hook<F>(&mut self, hook: F)
    where
        F: Fn(Result<(), BoxError>, &dyn Message) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_post_dispatch_hook(WithoutContext::new(hook));
    }

    /// Append a context-aware hook to the post-dispatch chain.
    pub fn add_post_dispatch_hook_ctx<F>(&mut self, hook: F)
    where
        F: Fn(&Context, Result<(), BoxError>, &dyn Message) -> Result<(), BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.register_post_dispatch_hook(hook);
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    /// Append `listener` to the listeners of `E`.
    pub fn register_event_listener<E, L>(&mut self, listener: L)
    where
        E: Message,
        L: Listener<E>,
    {
        let count = self.listeners.push::<E, L>(listener);

        #[cfg(feature = "tracing")]
        tracing::trace!(event = std::any::type_name::<E>(), count, "Registered listener");

        #[cfg(not(feature = "tracing"))]
        let _ = count;
    }

    /// Append a listener that does not need the context.
    pub fn add_event_listener<E, F>(&mut self, listener: F)
    where
        E: Message,
        F: Fn(&E) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_event_listener::<E, _>(WithoutContext::new(listener));
    }

    /// Append a listener that receives the publish context.
    pub fn add_event_listener_ctx<E, F>(&mut self, listener: F)
    where
        E: Message,
        F: Fn(&Context, &E) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_event_listener::<E, _>(listener);
    }

    /// Number of listeners registered for `E`.
    pub fn listener_count<E: Message>(&self) -> usize {
        self.listeners.count(TypeId::of::<E>())
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("handlers", &self.handlers.len())
            .field("listeners", &self.listeners.len())
            .field("pre_hooks", &self.pre_hooks.len())
            .field("post_hooks", &self.post_hooks.len())
            .finish_non_exhaustive()
    }
}
