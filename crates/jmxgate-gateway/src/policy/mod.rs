//! Policy layer (restrictor resolution, host/origin allowlists, access checks).
//!
//! Resolves the process-wide restrictor once at startup and exposes the
//! per-request [`AccessPolicy`] check the bridge runs before dispatch.

pub mod access;
pub mod allowlist;
pub mod document;
pub mod loader;

pub use access::{origin_or_referer, AccessDecision, AccessPolicy};
pub use document::{PolicyDocument, PolicyRestrictor};
pub use loader::{create_restrictor, lookup_policy_restrictor, PolicyLoadError};
