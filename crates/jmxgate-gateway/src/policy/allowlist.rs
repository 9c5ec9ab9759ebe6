//! Allowlist compilation and matching utilities.
//!
//! Host entries: exact name, IP address, CIDR block (`10.0.0.0/16`) or
//! leading wildcard (`*.internal.example`). Origin entries: glob with `*`.

use std::net::IpAddr;

use ipnetwork::IpNetwork;
use regex::Regex;

use jmxgate_core::error::{BridgeError, Result};

/// Compiled remote-host rule. Plain addresses compile to host-sized networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRule {
    Name(String),
    Network(IpNetwork),
    Suffix(String), // "*.example.com" => ".example.com"
}

/// Compiled origin rule: anchored, case-insensitive.
#[derive(Debug, Clone)]
pub struct OriginRule {
    re: Regex,
}

pub fn compile_host_rules(raw: &[String]) -> Result<Vec<HostRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        let s = s.trim();
        if s.is_empty() {
            return Err(BridgeError::Config("empty remote host entry".into()));
        }
        if let Some(suffix) = s.strip_prefix('*') {
            out.push(HostRule::Suffix(suffix.to_ascii_lowercase()));
        } else if let Ok(net) = s.parse::<IpNetwork>() {
            out.push(HostRule::Network(net));
        } else if s.contains('/') {
            return Err(BridgeError::Config(format!("invalid remote cidr: {s}")));
        } else {
            out.push(HostRule::Name(s.to_ascii_lowercase()));
        }
    }
    Ok(out)
}

pub fn compile_origin_rules(raw: &[String]) -> Result<Vec<OriginRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        let s = s.trim();
        if s.is_empty() {
            return Err(BridgeError::Config("empty allow_origins entry".into()));
        }
        out.push(OriginRule { re: glob_to_regex(s)? });
    }
    Ok(out)
}

/// `*` matches any run of characters (including none); everything else is literal.
fn glob_to_regex(glob: &str) -> Result<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("(?i)^{body}$"))
        .map_err(|e| BridgeError::Config(format!("invalid allow_origins entry {glob}: {e}")))
}

pub fn is_host_allowed(rules: &[HostRule], host: &str) -> bool {
    let host_lc = host.to_ascii_lowercase();
    let ip = host.parse::<IpAddr>().ok();
    rules.iter().any(|r| match r {
        HostRule::Name(n) => *n == host_lc,
        HostRule::Network(net) => ip.is_some_and(|ip| net.contains(ip)),
        HostRule::Suffix(sfx) => host_lc.ends_with(sfx.as_str()),
    })
}

pub fn is_origin_allowed(rules: &[OriginRule], origin: &str) -> bool {
    rules.iter().any(|r| r.re.is_match(origin))
}
