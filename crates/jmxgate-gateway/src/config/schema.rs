use std::collections::BTreeMap;

use serde::Deserialize;
use jmxgate_core::error::{BridgeError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub agent: AgentSection,

    /// Opaque engine overrides, handed to the engine untouched.
    #[serde(default)]
    pub engine: BTreeMap<String, String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            agent: AgentSection::default(),
            engine: BTreeMap::new(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.gateway.validate()?;   // Verify the scope of value

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Router prefix the bridge is nested under.
    #[serde(default = "default_mount")]
    pub mount: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            mount: default_mount(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !self.mount.starts_with('/') || self.mount.len() < 2 || self.mount.ends_with('/') {
            return Err(BridgeError::Config(
                "gateway.mount must start with '/', be non-root and have no trailing '/'".into(),
            ));
        }
        if !(1024..=64 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(BridgeError::Config(
                "gateway.max_body_bytes must be between 1024 and 67108864".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8778".into()
}
fn default_mount() -> String {
    "/jolokia".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    /// Fixed agent id; generated at startup when absent.
    #[serde(default)]
    pub agent_id: Option<String>,

    /// Policy document location. Supports `${env:NAME}`, `${host}`, `${ip}`.
    #[serde(default)]
    pub policy_location: Option<String>,
}
