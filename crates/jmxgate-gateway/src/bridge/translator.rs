use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;

use jmxgate_core::engine::{internal_error_payload, EngineCallResult, ManagementEngine, ParamMap};
use jmxgate_core::error::{BridgeError, Result};
use jmxgate_core::log::LogSink;

/// Charset handed to the engine for POST bodies.
pub const BODY_CHARSET: &str = "UTF-8";

/// Converts bridge requests into engine calls and faults into results.
pub struct RequestTranslator {
    engine: Arc<dyn ManagementEngine>,
    log: Arc<dyn LogSink>,
}

impl RequestTranslator {
    pub fn new(engine: Arc<dyn ManagementEngine>, log: Arc<dyn LogSink>) -> Self {
        Self { engine, log }
    }

    pub fn engine(&self) -> &dyn ManagementEngine {
        self.engine.as_ref()
    }

    /// Fold repeated query pairs into name -> values, keeping value order.
    pub fn build_params(query: &[(String, String)]) -> ParamMap {
        let mut out = ParamMap::new();
        for (name, value) in query {
            out.entry(name.clone()).or_default().push(value.clone());
        }
        out
    }

    pub async fn handle_get(&self, uri: &str, path: &str, params: &ParamMap) -> Result<EngineCallResult> {
        self.engine.handle_get(uri, path, params).await
    }

    /// Requires a buffered body; the buffering layer must run first.
    pub async fn handle_post(
        &self,
        uri: &str,
        path: &str,
        body: Option<Bytes>,
        charset: &str,
        params: &ParamMap,
    ) -> Result<EngineCallResult> {
        let body = body.ok_or_else(|| {
            BridgeError::MalformedRequest(
                "Missing body, make sure that the body buffering layer runs before the bridge".into(),
            )
        })?;
        self.engine.handle_post(uri, path, body, charset, params).await
    }

    /// Turn any failure into a result. Never fails, never panics.
    pub fn translate_fault(&self, cause: BridgeError) -> EngineCallResult {
        let cause = cause.innermost();
        let translated = panic::catch_unwind(AssertUnwindSafe(|| self.engine.handle_fault(&cause)));

        match translated {
            Ok(Some(payload)) if !payload.is_null() => EngineCallResult::new(payload),
            Ok(_) => {
                self.log.error(
                    &format!("engine {} produced no fault payload", self.engine.name()),
                    Some(&cause),
                );
                EngineCallResult::new(internal_error_payload())
            }
            Err(_) => {
                self.log.error(
                    &format!("fault translation of engine {} panicked", self.engine.name()),
                    Some(&cause),
                );
                EngineCallResult::new(internal_error_payload())
            }
        }
    }
}
