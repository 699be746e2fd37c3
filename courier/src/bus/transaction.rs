//! Transaction scope around units of work.

use super::Bus;
use courier_core::{BoxError, BusError, Context, TransactionManager};

impl Bus {
    /// Replace the transaction manager used by [`in_transaction`](Bus::in_transaction).
    pub fn set_transaction_manager<T: TransactionManager>(&mut self, manager: T) {
        self.transactions = Box::new(manager);
    }

    /// Run `work` through the configured [`TransactionManager`].
    ///
    /// The manager decides how the work is wrapped; the default runs it
    /// directly with `ctx`. Errors from the work keep their variant, so a
    /// failed dispatch inside the work still reports
    /// [`BusError::HandlerNotFound`].
    ///
    /// ```rust
    /// use courier::{BoxError, Bus, Context, Message};
    ///
    /// struct CreateUser;
    /// impl Message for CreateUser {}
    ///
    /// let bus = Bus::new();
    /// let err = bus
    ///     .in_transaction(&Context::background(), |ctx| {
    ///         bus.dispatch_ctx(ctx, &mut CreateUser)?;
    ///         Ok(())
    ///     })
    ///     .unwrap_err();
    /// assert!(err.is_handler_not_found());
    /// ```
    pub fn in_transaction<F>(&self, ctx: &Context, mut work: F) -> Result<(), BusError>
    where
        F: FnMut(&Context) -> Result<(), BoxError>,
    {
        self.transactions
            .in_transaction(ctx, &mut work)
            .map_err(BusError::from)
    }
}
