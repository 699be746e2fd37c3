//! Logging Hook - Observability for dispatch.

use courier_core::{BoxError, Context, Message, PostDispatchHook, PreDispatchHook};

/// A hook that logs every dispatch for observability.
///
/// Register the same value on both chains: before the handler it logs the
/// message type, afterwards it logs the outcome. The outcome is passed through
/// unchanged. Logging goes through `tracing` when the `tracing` feature is
/// enabled and is a no-op otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use courier::{Bus, hooks::LoggingHook};
///
/// let mut bus = Bus::new();
/// bus.register_pre_dispatch_hook(LoggingHook::named("api"));
/// bus.register_post_dispatch_hook(LoggingHook::named("api"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub fn new() -> Self {
        Self { name: "bus" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name is used in log messages to identify the wiring site.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The label attached to log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl PreDispatchHook for LoggingHook {
    fn before_dispatch(&self, _ctx: &Context, message: &dyn Message) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, message_type = message.type_name(), "Dispatching message");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, message); // Suppress unused warnings
        }

        Ok(())
    }
}

impl PostDispatchHook for LoggingHook {
    fn after_dispatch(
        &self,
        _ctx: &Context,
        outcome: Result<(), BoxError>,
        message: &dyn Message,
    ) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            match &outcome {
                Ok(()) => {
                    tracing::debug!(name = %self.name, message_type = message.type_name(), "Message handled")
                }
                Err(error) => {
                    tracing::warn!(name = %self.name, message_type = message.type_name(), %error, "Message handler failed")
                }
            }
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, message);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestEvent {
        data: String,
    }
    impl Message for TestEvent {}

    #[test]
    fn test_logging_hook_continues() {
        let hook = LoggingHook::new();
        let event = TestEvent {
            data: "test".into(),
        };

        assert!(hook.before_dispatch(&Context::background(), &event).is_ok());
        assert_eq!(event.data, "test");
    }

    #[test]
    fn test_logging_hook_passes_outcome_through() {
        let hook = LoggingHook::named("my_pipeline");
        let event = TestEvent {
            data: "test".into(),
        };

        let ok = hook.after_dispatch(&Context::background(), Ok(()), &event);
        assert!(ok.is_ok());

        let err = hook
            .after_dispatch(&Context::background(), Err("handler error".into()), &event)
            .unwrap_err();
        assert_eq!(err.to_string(), "handler error");
        assert_eq!(hook.name(), "my_pipeline");
    }
}
