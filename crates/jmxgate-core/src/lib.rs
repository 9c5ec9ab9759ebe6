//! jmxgate core: transport-agnostic bridge primitives.
//!
//! This crate defines the request snapshot, the management-engine call
//! contract, the restrictor and log capabilities, and the error surface shared
//! by the gateway and any engine implementation. It carries no HTTP or runtime
//! dependencies so engines can be written against it alone.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `BridgeError`/`Result` so a faulty
//! request can never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod log;
pub mod request;
pub mod restrictor;

pub use engine::{EngineCallResult, ManagementEngine, ParamMap, JSON_CONTENT_TYPE};
pub use error::{BridgeError, FaultCode, Result};
pub use log::LogSink;
pub use request::{HttpMethod, InboundRequest};
pub use restrictor::{AllowAllRestrictor, DenyAllRestrictor, Restrictor};
