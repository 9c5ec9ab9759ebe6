//! Process-wide access restrictor.
//!
//! Resolved once at startup and shared read-only by every request.

use std::fmt;

pub trait Restrictor: Send + Sync + fmt::Display {
    /// May a client at `host` reach the engine at all?
    fn is_remote_access_allowed(&self, host: &str) -> bool;

    /// May a browser page from `origin` reach the engine? `None` means the
    /// request carried neither Origin nor Referer.
    fn is_origin_allowed(&self, origin: Option<&str>) -> bool;
}

/// Grants everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllRestrictor;

impl Restrictor for AllowAllRestrictor {
    fn is_remote_access_allowed(&self, _host: &str) -> bool {
        true
    }

    fn is_origin_allowed(&self, _origin: Option<&str>) -> bool {
        true
    }
}

impl fmt::Display for AllowAllRestrictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AllowAllRestrictor")
    }
}

/// Denies everything. Installed when a configured policy cannot be read.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAllRestrictor;

impl Restrictor for DenyAllRestrictor {
    fn is_remote_access_allowed(&self, _host: &str) -> bool {
        false
    }

    fn is_origin_allowed(&self, _origin: Option<&str>) -> bool {
        false
    }
}

impl fmt::Display for DenyAllRestrictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DenyAllRestrictor")
    }
}
