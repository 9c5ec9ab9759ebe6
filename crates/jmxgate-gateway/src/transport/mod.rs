//! Transport layer (HTTP).
//!
//! Exposes the body buffering and bridge middleware plus the snapshot and
//! rendering helpers that sit between axum and the bridge.

pub mod http;
