use std::fmt;

use serde::Deserialize;

use jmxgate_core::error::Result;
use jmxgate_core::restrictor::Restrictor;

use super::allowlist::{
    compile_host_rules, compile_origin_rules, is_host_allowed, is_origin_allowed, HostRule,
    OriginRule,
};

/// On-disk policy document (YAML).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    /// Allowed client hosts. Empty => any host.
    #[serde(default)]
    pub remote: Vec<String>,

    #[serde(default)]
    pub cors: CorsSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSection {
    /// Allowed Origin/Referer globs. Empty => any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,

    /// Reject requests without Origin/Referer when `allow_origins` is set.
    #[serde(default)]
    pub strict_checking: bool,
}

/// Restrictor compiled from a [`PolicyDocument`].
/// Construct once at startup, then share via Arc.
#[derive(Debug)]
pub struct PolicyRestrictor {
    location: String,
    hosts: Vec<HostRule>,
    origins: Vec<OriginRule>,
    strict_checking: bool,
}

impl PolicyRestrictor {
    pub fn compile(location: impl Into<String>, doc: &PolicyDocument) -> Result<Self> {
        Ok(Self {
            location: location.into(),
            hosts: compile_host_rules(&doc.remote)?,
            origins: compile_origin_rules(&doc.cors.allow_origins)?,
            strict_checking: doc.cors.strict_checking,
        })
    }
}

impl Restrictor for PolicyRestrictor {
    fn is_remote_access_allowed(&self, host: &str) -> bool {
        self.hosts.is_empty() || is_host_allowed(&self.hosts, host)
    }

    fn is_origin_allowed(&self, origin: Option<&str>) -> bool {
        if self.origins.is_empty() {
            return true;
        }
        match origin {
            Some(o) => is_origin_allowed(&self.origins, o),
            None => !self.strict_checking,
        }
    }
}

impl fmt::Display for PolicyRestrictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyRestrictor[{}]", self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(yaml: &str) -> PolicyRestrictor {
        let doc: PolicyDocument = serde_yaml::from_str(yaml).unwrap();
        PolicyRestrictor::compile("test.yaml", &doc).unwrap()
    }

    #[test]
    fn empty_document_allows_everything() {
        let r = compile("{}");
        assert!(r.is_remote_access_allowed("10.0.0.9"));
        assert!(r.is_origin_allowed(Some("http://anywhere")));
        assert!(r.is_origin_allowed(None));
    }

    #[test]
    fn remote_list_restricts_hosts() {
        let r = compile("remote: [\"127.0.0.1\", \"192.168.0.0/24\"]");
        assert!(r.is_remote_access_allowed("192.168.0.77"));
        assert!(!r.is_remote_access_allowed("10.0.0.9"));
    }

    #[test]
    fn origin_list_and_strict_checking() {
        let lax = compile("cors: { allow_origins: [\"https://*.acme.io\"] }");
        assert!(lax.is_origin_allowed(Some("https://ops.acme.io")));
        assert!(!lax.is_origin_allowed(Some("https://evil.io")));
        assert!(lax.is_origin_allowed(None));

        let strict =
            compile("cors: { allow_origins: [\"https://*.acme.io\"], strict_checking: true }");
        assert!(!strict.is_origin_allowed(None));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_yaml::from_str::<PolicyDocument>("remotes: []").is_err());
    }

    #[test]
    fn display_names_location() {
        assert_eq!(compile("{}").to_string(), "PolicyRestrictor[test.yaml]");
    }
}
