//! Fan-out publication to event listeners.

use super::Bus;
use courier_core::{BusError, Context, Message};

impl Bus {
    /// Publish `event` with a background context.
    ///
    /// See [`publish_ctx`](Bus::publish_ctx).
    pub fn publish<E: Message + ?Sized>(&self, event: &E) -> Result<(), BusError> {
        self.publish_ctx(&Context::background(), event)
    }

    /// Invoke every listener registered for the runtime type of `event`, in
    /// registration order.
    ///
    /// The first listener error stops the fan-out and is returned; later
    /// listeners do not run. An event type without listeners is not an error.
    pub fn publish_ctx<E: Message + ?Sized>(&self, ctx: &Context, event: &E) -> Result<(), BusError> {
        let event = event.as_message();
        let listeners = self.listeners.resolve(event.message_type_id());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            event = event.type_name(),
            listeners = listeners.len(),
            "Publishing event"
        );

        for listener in listeners {
            if let Err(error) = listener.call(ctx, event) {
                #[cfg(feature = "tracing")]
                tracing::debug!(event = event.type_name(), %error, "Listener failed");
                return Err(BusError::from(error));
            }
        }

        Ok(())
    }
}
