//! Bridge config loader (strict parsing).

pub mod expr;
pub mod schema;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jmxgate_core::error::{BridgeError, Result};

pub use schema::{AgentSection, BridgeConfig, GatewaySection};

pub fn load_from_file(path: &str) -> Result<BridgeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BridgeError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<BridgeConfig> {
    if !Path::new(path).exists() {
        tracing::info!(%path, "no config file, using defaults");
        return Ok(BridgeConfig::default());
    }
    load_from_file(path)
}

pub fn load_from_str(s: &str) -> Result<BridgeConfig> {
    let cfg: BridgeConfig = serde_yaml::from_str(s)
        .map_err(|e| BridgeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Values resolved once at startup and handed to the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub agent_id: String,
    /// Expanded policy location; `None` when unset or blank.
    pub policy_location: Option<String>,
    pub overrides: BTreeMap<String, String>,
}

impl EngineConfig {
    pub fn resolve(cfg: &BridgeConfig) -> Result<Self> {
        let agent_id = match &cfg.agent.agent_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => expr::generate_agent_id("axum"),
        };

        let policy_location = match cfg.agent.policy_location.as_deref().map(str::trim) {
            Some(loc) if !loc.is_empty() => Some(expr::replace_expression(loc)?),
            _ => None,
        };

        Ok(Self {
            agent_id,
            policy_location,
            overrides: cfg.engine.clone(),
        })
    }
}
