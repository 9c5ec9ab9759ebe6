//! jmxgate gateway library entry.
//!
//! This crate wires config, access policy, the request bridge and the HTTP
//! transport into an axum router in front of a management engine. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bridge;
pub mod config;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;
pub mod transport;
