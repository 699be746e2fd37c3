//! Message trait for commands, queries and events.

use std::any::{Any, TypeId};

/// A marker trait for values routed through the bus.
///
/// A message is keyed by its concrete type: two structurally identical types
/// are still different messages. Messages must be `Send + Sync + 'static` so a
/// wired bus can be shared across threads.
///
/// # Example
///
/// ```rust
/// use courier_core::Message;
///
/// #[derive(Default)]
/// struct GetUser {
///     id: u64,
///     name: Option<String>,
/// }
///
/// impl Message for GetUser {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must implement `Message`",
    note = "Add `impl Message for {Self} {{}}` or `#[derive(Message)]`."
)]
pub trait Message: AsAnyMessage + Send + Sync + 'static {}

/// Object-safe access to the concrete type behind a message.
///
/// Implemented for every sized [`Message`]; the methods resolve through the
/// vtable when called on `dyn Message`, so they always report the runtime
/// type rather than the type of the reference.
pub trait AsAnyMessage {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Borrow as `&dyn Message`.
    fn as_message(&self) -> &dyn Message;

    /// Borrow as `&mut dyn Message`.
    fn as_message_mut(&mut self) -> &mut dyn Message;

    /// The concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Message> AsAnyMessage for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_message(&self) -> &dyn Message {
        self
    }

    fn as_message_mut(&mut self) -> &mut dyn Message {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn Message {
    /// The routing key of the value behind this reference.
    pub fn message_type_id(&self) -> TypeId {
        Any::type_id(self.as_any())
    }

    /// Returns `true` if the message is of type `T`.
    pub fn is<T: Message>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to a concrete message type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete message type, mutably.
    pub fn downcast_mut<T: Message>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}

// Common Message implementations
impl Message for () {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
