//! `${...}` expression substitution and agent id generation.
//!
//! Supported expressions:
//! - `${env:NAME}` : environment variable (must be set)
//! - `${host}`     : local host name
//! - `${ip}`       : first address the local host name resolves to

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::net::ToSocketAddrs;

use jmxgate_core::error::{BridgeError, Result};

/// Replace every `${...}` expression in `input`.
pub fn replace_expression(input: &str) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            BridgeError::Config(format!("unterminated expression in '{input}'"))
        })?;
        out.push_str(&resolve(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn resolve(expr: &str) -> Result<String> {
    if let Some(name) = expr.strip_prefix("env:") {
        return std::env::var(name)
            .map_err(|_| BridgeError::Config(format!("environment variable {name} is not set")));
    }
    match expr {
        "host" => Ok(local_host_name()),
        "ip" => Ok(local_ip()),
        other => Err(BridgeError::Config(format!("unknown expression ${{{other}}}"))),
    }
}

pub fn local_host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}

pub fn local_ip() -> String {
    (local_host_name().as_str(), 0)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|a| a.ip().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// `<ip>-<pid>-<hash>-<kind>`, unique per bridge instance.
pub fn generate_agent_id(kind: &str) -> String {
    let mut h = RandomState::new().build_hasher();
    h.write_u32(std::process::id());
    let seed = h.finish() as u32;
    format!("{}-{}-{:08x}-{}", local_ip(), std::process::id(), seed, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_is_untouched() {
        assert_eq!(replace_expression("/etc/jmxgate/access.yaml").unwrap(), "/etc/jmxgate/access.yaml");
    }

    #[test]
    fn env_expression_is_expanded() {
        std::env::set_var("JMXGATE_TEST_POLICY_DIR", "/srv/policies");
        let s = replace_expression("${env:JMXGATE_TEST_POLICY_DIR}/access.yaml").unwrap();
        assert_eq!(s, "/srv/policies/access.yaml");
        std::env::remove_var("JMXGATE_TEST_POLICY_DIR");
    }

    #[test]
    fn host_expression_is_expanded() {
        let s = replace_expression("policy-${host}.yaml").unwrap();
        assert!(!s.contains("${"));
        assert!(s.starts_with("policy-") && s.ends_with(".yaml"));
    }

    #[test]
    fn unset_env_is_an_error() {
        std::env::remove_var("JMXGATE_TEST_SURELY_UNSET");
        assert!(replace_expression("${env:JMXGATE_TEST_SURELY_UNSET}").is_err());
    }

    #[test]
    fn unknown_and_unterminated_expressions_fail() {
        assert!(replace_expression("${prop:foo}").is_err());
        assert!(replace_expression("abc${host").is_err());
    }

    #[test]
    fn agent_id_has_kind_suffix() {
        let id = generate_agent_id("axum");
        assert!(id.ends_with("-axum"));
        assert!(id.contains(&std::process::id().to_string()));
    }
}
