//! Type-keyed storage behind the bus.
//!
//! Handlers and listeners are registered with a concrete message type and
//! stored type-erased under that type's [`TypeId`]. At call time the message
//! arrives as `&dyn Message` and the typed wrapper downcasts it back.

use courier_core::{BoxError, BusError, Context, Handler, Listener, Message};
use std::{any::TypeId, collections::HashMap, marker::PhantomData};

/// Type-erased handler trait for dynamic dispatch.
pub(crate) trait ErasedHandler: Send + Sync {
    /// Execute the handler with a type-erased message.
    fn call(&self, ctx: &Context, message: &mut dyn Message) -> Result<(), BoxError>;
}

/// Type-erased listener trait for fan-out.
pub(crate) trait ErasedListener: Send + Sync {
    /// Execute the listener with a type-erased event.
    fn call(&self, ctx: &Context, event: &dyn Message) -> Result<(), BoxError>;
}

fn mismatch<M: Message>(found: &'static str) -> BoxError {
    Box::new(BusError::MessageType {
        expected: std::any::type_name::<M>(),
        found,
    })
}

/// Bridges a typed [`Handler`] into the erased registry.
struct TypedHandler<M, H> {
    handler: H,
    _message: PhantomData<fn(&mut M)>,
}

impl<M, H> ErasedHandler for TypedHandler<M, H>
where
    M: Message,
    H: Handler<M>,
{
    fn call(&self, ctx: &Context, message: &mut dyn Message) -> Result<(), BoxError> {
        let found = message.type_name();
        match message.downcast_mut::<M>() {
            Some(message) => self.handler.handle(ctx, message),
            None => Err(mismatch::<M>(found)),
        }
    }
}

/// Bridges a typed [`Listener`] into the erased registry.
struct TypedListener<E, L> {
    listener: L,
    _event: PhantomData<fn(&E)>,
}

impl<E, L> ErasedListener for TypedListener<E, L>
where
    E: Message,
    L: Listener<E>,
{
    fn call(&self, ctx: &Context, event: &dyn Message) -> Result<(), BoxError> {
        match event.downcast_ref::<E>() {
            Some(event) => self.listener.on_event(ctx, event),
            None => Err(mismatch::<E>(event.type_name())),
        }
    }
}

/// At most one handler per message type.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    handlers: HashMap<TypeId, Box<dyn ErasedHandler>>,
}

impl HandlerRegistry {
    /// Store `handler` for `M`, replacing any previous one.
    ///
    /// Returns `true` if a handler was replaced.
    pub(crate) fn insert<M, H>(&mut self, handler: H) -> bool
    where
        M: Message,
        H: Handler<M>,
    {
        let entry = TypedHandler {
            handler,
            _message: PhantomData,
        };
        self.handlers
            .insert(TypeId::of::<M>(), Box::new(entry))
            .is_some()
    }

    pub(crate) fn resolve(&self, type_id: TypeId) -> Option<&dyn ErasedHandler> {
        self.handlers.get(&type_id).map(|handler| &**handler)
    }

    pub(crate) fn contains(&self, type_id: TypeId) -> bool {
        self.handlers.contains_key(&type_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

/// Any number of listeners per event type, in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<TypeId, Vec<Box<dyn ErasedListener>>>,
}

impl ListenerRegistry {
    /// Append `listener` for `E`. Returns the new listener count for `E`.
    pub(crate) fn push<E, L>(&mut self, listener: L) -> usize
    where
        E: Message,
        L: Listener<E>,
    {
        let entry = TypedListener {
            listener,
            _event: PhantomData,
        };
        let slot = self.listeners.entry(TypeId::of::<E>()).or_default();
        slot.push(Box::new(entry));
        slot.len()
    }

    /// Listeners for `type_id`; empty when none are registered.
    pub(crate) fn resolve(&self, type_id: TypeId) -> &[Box<dyn ErasedListener>] {
        self.listeners
            .get(&type_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, type_id: TypeId) -> usize {
        self.resolve(type_id).len()
    }

    /// Total number of listeners across all event types.
    pub(crate) fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

/// An ordered chain of hooks.
pub(crate) struct HookChain<H: ?Sized> {
    hooks: Vec<Box<H>>,
}

impl<H: ?Sized> Default for HookChain<H> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<H: ?Sized> HookChain<H> {
    pub(crate) fn push(&mut self, hook: Box<H>) {
        self.hooks.push(hook);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &H> {
        self.hooks.iter().map(|hook| &**hook)
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }
}
