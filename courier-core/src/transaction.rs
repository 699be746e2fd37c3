//! Transaction scope for units of work that span several dispatches.

use crate::{context::Context, error::BoxError};

/// A unit of work run inside a transaction.
pub type Work<'a> = dyn FnMut(&Context) -> Result<(), BoxError> + 'a;

/// Wraps a unit of work in a transaction.
///
/// Implementations typically open a transaction, store its handle in a child
/// [`Context`] so handlers can find it, run `work`, and commit or roll back
/// depending on the result.
pub trait TransactionManager: Send + Sync + 'static {
    /// Run `work` inside a transaction.
    fn in_transaction(&self, ctx: &Context, work: &mut Work<'_>) -> Result<(), BoxError>;
}

/// A manager that runs the work directly, without a transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransactionManager;

impl TransactionManager for NoopTransactionManager {
    fn in_transaction(&self, ctx: &Context, work: &mut Work<'_>) -> Result<(), BoxError> {
        work(ctx)
    }
}
