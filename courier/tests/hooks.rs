use courier::{
    BoxError, Bus, Context, Message, PostDispatchHook,
    hooks::LoggingHook,
    testing::{CountingHook, FailingHook, InjectedFailure},
};
use std::sync::{Arc, Mutex};

mod common;
use common::{Calls, TestQuery, answer};

#[test]
fn test_hooks_run_once_each_per_dispatch() {
    let pre = CountingHook::new();
    let post = CountingHook::new();
    let mut bus = Bus::new();
    bus.register_pre_dispatch_hook(pre.clone());
    bus.register_post_dispatch_hook(post.clone());
    bus.add_handler(answer("ok"));

    bus.dispatch(&mut TestQuery::default()).unwrap();
    bus.dispatch(&mut TestQuery::default()).unwrap();

    assert_eq!(pre.count(), 2);
    assert_eq!(post.count(), 2);
}

#[test]
fn test_hooks_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut bus = Bus::new();
    bus.register_pre_dispatch_hook(CountingHook::with_order(1, order.clone()));
    bus.register_pre_dispatch_hook(CountingHook::with_order(2, order.clone()));
    bus.register_post_dispatch_hook(CountingHook::with_order(3, order.clone()));
    bus.register_post_dispatch_hook(CountingHook::with_order(4, order.clone()));

    let log = order.clone();
    bus.add_handler(move |_q: &mut TestQuery| -> Result<(), BoxError> {
        log.lock().unwrap().push(0);
        Ok(())
    });

    bus.dispatch(&mut TestQuery::default()).unwrap();
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 0, 3, 4]);
}

#[test]
fn test_failing_pre_hook_aborts_dispatch() {
    let handled = Calls::new();
    let later = CountingHook::new();
    let post = CountingHook::new();
    let mut bus = Bus::new();
    bus.register_pre_dispatch_hook(FailingHook::new("quota exceeded"));
    bus.register_pre_dispatch_hook(later.clone());
    bus.register_post_dispatch_hook(post.clone());

    let counter = handled.clone();
    bus.add_handler(move |_q: &mut TestQuery| -> Result<(), BoxError> {
        counter.hit();
        Ok(())
    });

    let err = bus.dispatch(&mut TestQuery::default()).unwrap_err();

    assert_eq!(
        err.downcast_ref::<InjectedFailure>(),
        Some(&InjectedFailure("quota exceeded".into()))
    );
    assert_eq!(handled.get(), 0);
    assert_eq!(later.count(), 0);
    assert_eq!(post.count(), 0);
}

#[test]
fn test_post_hook_observes_handler_error() {
    let observed = Arc::new(Mutex::new(None));
    let mut bus = Bus::new();
    bus.add_handler(|_q: &mut TestQuery| -> Result<(), BoxError> { Err("boom".into()) });

    let slot = observed.clone();
    bus.add_post_dispatch_hook(move |outcome, _msg| {
        *slot.lock().unwrap() = outcome.as_ref().err().map(|err| err.to_string());
        outcome
    });

    let err = bus.dispatch(&mut TestQuery::default()).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(observed.lock().unwrap().as_deref(), Some("boom"));
}

#[test]
fn test_post_hook_can_suppress_error() {
    let mut bus = Bus::new();
    bus.add_handler(|_q: &mut TestQuery| -> Result<(), BoxError> { Err("transient".into()) });
    bus.add_post_dispatch_hook(|_outcome, _msg| Ok(()));

    assert!(bus.dispatch(&mut TestQuery::default()).is_ok());
}

#[test]
fn test_post_hook_can_replace_error() {
    let mut bus = Bus::new();
    bus.add_handler(answer("fine"));
    bus.add_post_dispatch_hook(|outcome, msg| {
        let query = msg.downcast_ref::<TestQuery>().ok_or("unexpected message")?;
        if query.resp == "fine" {
            return Err("audit rejected".into());
        }
        outcome
    });

    let err = bus.dispatch(&mut TestQuery::default()).unwrap_err();
    assert_eq!(err.to_string(), "audit rejected");
}

#[test]
fn test_post_hooks_chain_outcomes() {
    let mut bus = Bus::new();
    bus.add_handler(|_q: &mut TestQuery| -> Result<(), BoxError> { Err("first".into()) });
    bus.add_post_dispatch_hook(|outcome, _msg| match outcome {
        Err(err) => Err(format!("{err}, then second").into()),
        ok => ok,
    });
    bus.add_post_dispatch_hook(|outcome, _msg| match outcome {
        Err(err) => Err(format!("{err}, then third").into()),
        ok => ok,
    });

    let err = bus.dispatch(&mut TestQuery::default()).unwrap_err();
    assert_eq!(err.to_string(), "first, then second, then third");
}

#[test]
fn test_context_hooks_receive_dispatch_context() {
    struct Tenant(&'static str);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut bus = Bus::new();
    bus.add_handler(answer("ok"));

    let pre = seen.clone();
    bus.add_pre_dispatch_hook_ctx(move |ctx: &Context, _msg: &dyn Message| {
        pre.lock().unwrap().push(ctx.value::<Tenant>().map(|t| t.0));
        Ok(())
    });
    let post = seen.clone();
    bus.add_post_dispatch_hook_ctx(
        move |ctx: &Context, outcome: Result<(), BoxError>, _msg: &dyn Message| {
            post.lock().unwrap().push(ctx.value::<Tenant>().map(|t| t.0));
            outcome
        },
    );

    let ctx = Context::background().with_value(Tenant("acme"));
    bus.dispatch_ctx(&ctx, &mut TestQuery::default()).unwrap();
    bus.dispatch(&mut TestQuery::default()).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Some("acme"), Some("acme"), None, None]
    );
}

#[test]
fn test_logging_hook_passes_outcome_through() {
    let mut bus = Bus::new();
    bus.register_pre_dispatch_hook(LoggingHook::named("audit"));
    bus.register_post_dispatch_hook(LoggingHook::named("audit"));
    bus.add_handler(|_q: &mut TestQuery| -> Result<(), BoxError> { Err("kept".into()) });

    let err = bus.dispatch(&mut TestQuery::default()).unwrap_err();
    assert_eq!(err.to_string(), "kept");

    let outcome = LoggingHook::new().after_dispatch(
        &Context::background(),
        Ok(()),
        &TestQuery::default(),
    );
    assert!(outcome.is_ok());
}
