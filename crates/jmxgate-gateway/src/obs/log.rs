use std::error::Error;

use jmxgate_core::log::LogSink;

/// [`LogSink`] over `tracing`, target `jmxgate::bridge`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "jmxgate::bridge", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "jmxgate::bridge", "{message}");
    }

    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>) {
        match cause {
            Some(c) => tracing::error!(target: "jmxgate::bridge", cause = %c, "{message}"),
            None => tracing::error!(target: "jmxgate::bridge", "{message}"),
        }
    }

    fn is_debug(&self) -> bool {
        tracing::enabled!(target: "jmxgate::bridge", tracing::Level::DEBUG)
    }
}
