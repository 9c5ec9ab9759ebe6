//! Management-engine call contract.
//!
//! The engine (attribute read/write, search, value serialization) lives
//! outside this workspace. The bridge only ever talks to it through
//! [`ManagementEngine`], so any engine satisfying this shape can be mounted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use crate::error::{BridgeError, FaultCode, Result};

/// Media type of every bridge response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Field of an object payload that carries the HTTP status.
pub const STATUS_FIELD: &str = "status";

/// Engine parameter shape: name -> values in original order.
pub type ParamMap = BTreeMap<String, Vec<String>>;

/// Result of one engine call (or of fault translation).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCallResult {
    pub payload: Value,
}

impl EngineCallResult {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// Integer `status` of an object payload when it is a usable HTTP status,
    /// 200 otherwise (arrays, missing or non-integer fields).
    pub fn status_code(&self) -> u16 {
        self.payload
            .as_object()
            .and_then(|o| o.get(STATUS_FIELD))
            .and_then(Value::as_u64)
            .filter(|s| (100..=599).contains(s))
            .map(|s| s as u16)
            .unwrap_or(200)
    }

    pub fn to_json_string(&self) -> String {
        self.payload.to_string()
    }
}

/// Call interface of the external management engine.
#[async_trait]
pub trait ManagementEngine: Send + Sync {
    /// Human-readable engine name for logs.
    fn name(&self) -> &str;

    /// Engine-side access check. Raises on denial.
    fn check_access(
        &self,
        _target_host: &str,
        _remote_host: &str,
        _origin: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    /// GET-style call; `path` is the request path without the mount prefix.
    async fn handle_get(&self, uri: &str, path: &str, params: &ParamMap) -> Result<EngineCallResult>;

    /// POST-style call over a buffered body.
    async fn handle_post(
        &self,
        uri: &str,
        path: &str,
        body: Bytes,
        charset: &str,
        params: &ParamMap,
    ) -> Result<EngineCallResult>;

    /// Engine's own fault-to-JSON translator. `None` means "no payload".
    fn handle_fault(&self, cause: &BridgeError) -> Option<Value> {
        Some(fault_payload(cause))
    }
}

/// Default JSON rendering of a fault.
pub fn fault_payload(cause: &BridgeError) -> Value {
    let code = cause.fault_code();
    json!({
        "status": code.status(),
        "error_type": code.as_str(),
        "error": cause.to_string(),
    })
}

/// Payload used when fault translation itself produced nothing.
pub fn internal_error_payload() -> Value {
    json!({
        "status": FaultCode::Internal.status(),
        "error_type": FaultCode::Internal.as_str(),
        "error": "Internal error while handling an exception",
    })
}
