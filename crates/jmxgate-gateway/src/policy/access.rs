use std::sync::Arc;

use jmxgate_core::restrictor::Restrictor;

/// Decision from access evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny { reason: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Secondary cross-origin check in front of the engine.
/// Holds the process-wide restrictor; cheap to share via Arc.
pub struct AccessPolicy {
    restrictor: Arc<dyn Restrictor>,
}

impl AccessPolicy {
    pub fn new(restrictor: Arc<dyn Restrictor>) -> Self {
        Self { restrictor }
    }

    /// `origin_or_referer` must already be sanitized (see [`origin_or_referer`]).
    pub fn authorize(&self, remote_host: &str, origin_or_referer: Option<&str>) -> AccessDecision {
        if !self.restrictor.is_remote_access_allowed(remote_host) {
            return AccessDecision::Deny {
                reason: format!("No access from client {remote_host} allowed"),
            };
        }
        if !self.restrictor.is_origin_allowed(origin_or_referer) {
            return AccessDecision::Deny {
                reason: match origin_or_referer {
                    Some(o) => format!("Origin {o} is not allowed to call this agent"),
                    None => "Requests without Origin or Referer are not allowed".to_string(),
                },
            };
        }
        AccessDecision::Allow
    }
}

/// Origin wins over Referer; the chosen value loses every CR and LF.
pub fn origin_or_referer(origin: Option<&str>, referer: Option<&str>) -> Option<String> {
    origin.or(referer).map(strip_crlf)
}

fn strip_crlf(s: &str) -> String {
    s.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}
