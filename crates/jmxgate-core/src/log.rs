//! Logging capability handed to the bridge and the policy loader.

use std::error::Error;

/// Narrow log interface: three levels, error with optional cause.
pub trait LogSink: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>);

    fn is_debug(&self) -> bool {
        true
    }
}
