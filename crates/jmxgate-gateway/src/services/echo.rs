use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use jmxgate_core::engine::{EngineCallResult, ManagementEngine, ParamMap};
use jmxgate_core::error::{BridgeError, Result};

use crate::config::EngineConfig;

/// Engine without query semantics: answers `/version` and echoes everything else.
/// Useful to prove the bridge end to end.
pub struct EchoEngine {
    agent_id: String,
    overrides: Value,
}

impl EchoEngine {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            agent_id: cfg.agent_id.clone(),
            overrides: json!(cfg.overrides),
        }
    }

    fn echo(uri: &str, path: &str, params: &ParamMap, body: Option<Value>) -> Value {
        let mut request = json!({ "uri": uri, "path": path, "params": params });
        if let Some(body) = body {
            request["body"] = body;
        }
        json!({ "status": 200, "request": request })
    }
}

#[async_trait]
impl ManagementEngine for EchoEngine {
    fn name(&self) -> &str {
        "echo"
    }

    async fn handle_get(&self, uri: &str, path: &str, params: &ParamMap) -> Result<EngineCallResult> {
        let trimmed = path.trim_end_matches('/');
        if trimmed == "/version" {
            return Ok(EngineCallResult::new(json!({
                "status": 200,
                "value": {
                    "agent": env!("CARGO_PKG_VERSION"),
                    "config": { "agentId": self.agent_id, "overrides": self.overrides },
                },
            })));
        }
        if trimmed.is_empty() {
            return Err(BridgeError::NotFound("no operation in request path".into()));
        }
        Ok(EngineCallResult::new(Self::echo(uri, path, params, None)))
    }

    async fn handle_post(
        &self,
        uri: &str,
        path: &str,
        body: Bytes,
        charset: &str,
        params: &ParamMap,
    ) -> Result<EngineCallResult> {
        if !charset.eq_ignore_ascii_case("UTF-8") {
            return Err(BridgeError::MalformedRequest(format!("unsupported charset {charset}")));
        }
        let parsed: Value = serde_json::from_slice(&body)
            .map_err(|e| BridgeError::MalformedRequest(format!("invalid JSON body: {e}")))?;

        // Bulk requests answer with one result per element.
        let payload = match parsed {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| Self::echo(uri, path, params, Some(item)))
                    .collect(),
            ),
            single => Self::echo(uri, path, params, Some(single)),
        };
        Ok(EngineCallResult::new(payload))
    }
}
