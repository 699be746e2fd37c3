//! Single-handler dispatch through the hook chains.

use super::Bus;
use courier_core::{BusError, Context, Message};

impl Bus {
    /// Dispatch `message` with a background context.
    ///
    /// See [`dispatch_ctx`](Bus::dispatch_ctx).
    pub fn dispatch<M: Message + ?Sized>(&self, message: &mut M) -> Result<(), BusError> {
        self.dispatch_ctx(&Context::background(), message)
    }

    /// Route `message` to the handler registered for its runtime type.
    ///
    /// 1. No handler: [`BusError::HandlerNotFound`], and no hook runs.
    /// 2. Pre-dispatch hooks run in order; the first error aborts the
    ///    dispatch before the handler and is returned.
    /// 3. The handler runs and may write a response into `message`.
    /// 4. Post-dispatch hooks run in order, each receiving the outcome of the
    ///    previous step and returning the next one.
    ///
    /// The result is the outcome of the last post-dispatch hook, or of the
    /// handler when there are none. `ctx` is handed through untouched.
    ///
    /// `M` may be `dyn Message`, in which case the value's concrete type is
    /// used for routing.
    pub fn dispatch_ctx<M: Message + ?Sized>(
        &self,
        ctx: &Context,
        message: &mut M,
    ) -> Result<(), BusError> {
        self.dispatch_erased(ctx, message.as_message_mut())
    }

    fn dispatch_erased(&self, ctx: &Context, message: &mut dyn Message) -> Result<(), BusError> {
        let message_type = message.type_name();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("dispatch", message_type).entered();

        let Some(handler) = self.handlers.resolve(message.message_type_id()) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("No handler registered");
            return Err(BusError::HandlerNotFound { message_type });
        };

        for hook in self.pre_hooks.iter() {
            if let Err(error) = hook.before_dispatch(ctx, &*message) {
                #[cfg(feature = "tracing")]
                tracing::debug!(%error, "Pre-dispatch hook aborted dispatch");
                return Err(BusError::from(error));
            }
        }

        let mut outcome = handler.call(ctx, message);

        for hook in self.post_hooks.iter() {
            outcome = hook.after_dispatch(ctx, outcome, &*message);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(ok = outcome.is_ok(), "Dispatch finished");

        outcome.map_err(BusError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::BoxError;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Default)]
    struct TestQuery {
        resp: String,
    }
    impl Message for TestQuery {}

    #[test]
    fn test_hooks_see_response_only_after_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = Bus::new();

        let pre_seen = seen.clone();
        bus.add_pre_dispatch_hook(move |msg| {
            let query = msg.downcast_ref::<TestQuery>().unwrap();
            pre_seen.lock().unwrap().push(format!("pre:{}", query.resp));
            Ok(())
        });
        let post_seen = seen.clone();
        bus.add_post_dispatch_hook(move |outcome, msg| {
            let query = msg.downcast_ref::<TestQuery>().unwrap();
            post_seen.lock().unwrap().push(format!("post:{}", query.resp));
            outcome
        });
        bus.add_handler(|q: &mut TestQuery| -> Result<(), BoxError> {
            q.resp = "done".into();
            Ok(())
        });

        bus.dispatch(&mut TestQuery::default()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["pre:", "post:done"]);
    }

    #[test]
    fn test_dyn_message_routes_by_concrete_type() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut bus = Bus::new();

        let counter = calls.clone();
        bus.add_handler(move |_q: &mut TestQuery| -> Result<(), BoxError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let mut boxed: Box<dyn Message> = Box::new(TestQuery::default());
        bus.dispatch(&mut *boxed).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut unhandled: Box<dyn Message> = Box::new(String::from("nobody home"));
        let err = bus.dispatch(&mut *unhandled).unwrap_err();
        assert!(err.is_handler_not_found());
        assert!(!matches!(err, BusError::MessageType { .. }));
        assert!(err.to_string().starts_with("handler not found for message type"));
        assert!(err.to_string().contains("String"));
    }
}
