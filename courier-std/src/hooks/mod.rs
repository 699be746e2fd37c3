//! Standard dispatch hooks.

pub mod cancellation;
pub mod logging;

pub use cancellation::CancellationHook;
pub use logging::LoggingHook;
