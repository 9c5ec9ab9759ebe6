//! Observability: the tracing-backed log sink and in-process metrics.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler.

pub mod log;
pub mod metrics;

pub use log::TracingLogSink;
pub use metrics::BridgeMetrics;
