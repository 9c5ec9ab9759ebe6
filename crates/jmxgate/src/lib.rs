//! Top-level facade crate for jmxgate.
//!
//! Re-exports the engine contract and the gateway library so embedders can
//! depend on a single crate.

pub mod core {
    pub use jmxgate_core::*;
}

pub mod gateway {
    pub use jmxgate_gateway::*;
}

pub use jmxgate_core::{EngineCallResult, ManagementEngine, Restrictor};
pub use jmxgate_gateway::{app_state::AppState, router::build_router};
