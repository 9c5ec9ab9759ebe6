//! Per-request bridge state machine.
//!
//! `Received -> Authorizing -> {Dispatching | Denied} -> Responding -> Done`
//!
//! Every GET/POST produces exactly one [`EngineCallResult`]: engine errors,
//! policy denials and panics all go through fault translation. Any other
//! method is declined untouched so the next stage of the router can answer.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;

use jmxgate_core::engine::EngineCallResult;
use jmxgate_core::error::{BridgeError, Result};
use jmxgate_core::log::LogSink;
use jmxgate_core::request::{HttpMethod, InboundRequest};

use crate::obs::BridgeMetrics;
use crate::policy::{origin_or_referer, AccessDecision, AccessPolicy};

use super::translator::{RequestTranslator, BODY_CHARSET};

/// Outcome of one pass through the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Engine produced a result.
    Handled(EngineCallResult),
    /// Not a GET/POST; nothing was done and nothing must be written.
    Declined,
    /// Policy, engine or bridge failed; result is the translated fault.
    Failed(EngineCallResult),
}

impl Dispatch {
    /// Result to render, `None` when declined.
    pub fn into_result(self) -> Option<EngineCallResult> {
        match self {
            Dispatch::Handled(r) | Dispatch::Failed(r) => Some(r),
            Dispatch::Declined => None,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            Dispatch::Handled(_) => "handled",
            Dispatch::Declined => "declined",
            Dispatch::Failed(_) => "failed",
        }
    }
}

pub struct BridgeHandler {
    policy: AccessPolicy,
    translator: RequestTranslator,
    log: Arc<dyn LogSink>,
    metrics: Arc<BridgeMetrics>,
}

impl BridgeHandler {
    pub fn new(
        policy: AccessPolicy,
        translator: RequestTranslator,
        log: Arc<dyn LogSink>,
        metrics: Arc<BridgeMetrics>,
    ) -> Self {
        Self {
            policy,
            translator,
            log,
            metrics,
        }
    }

    #[tracing::instrument(
        name = "bridge",
        skip_all,
        fields(method = %req.method.as_str(), path = %req.path, remote = %req.remote_host)
    )]
    pub async fn handle(&self, req: InboundRequest) -> Dispatch {
        if !matches!(req.method, HttpMethod::Get | HttpMethod::Post) {
            if self.log.is_debug() {
                self.log.debug(&format!("declining {} {}", req.method.as_str(), req.path));
            }
            self.metrics.requests.inc(&[("outcome", "declined")]);
            return Dispatch::Declined;
        }

        let method = req.method.as_str().to_string();
        let start = Instant::now();

        let dispatch = match AssertUnwindSafe(self.authorize_and_dispatch(req)).catch_unwind().await {
            Ok(Ok(result)) => Dispatch::Handled(result),
            Ok(Err(e)) => Dispatch::Failed(self.fault(e)),
            Err(panic) => {
                let msg = format!("request handling panicked: {}", panic_message(panic.as_ref()));
                Dispatch::Failed(self.fault(BridgeError::Internal(msg)))
            }
        };

        self.metrics
            .dispatch_duration
            .observe(&[("method", method.as_str())], start.elapsed());
        self.metrics.requests.inc(&[("outcome", dispatch.outcome())]);
        dispatch
    }

    async fn authorize_and_dispatch(&self, req: InboundRequest) -> Result<EngineCallResult> {
        // Authorizing
        let origin = origin_or_referer(req.origin.as_deref(), req.referer.as_deref());
        if let AccessDecision::Deny { reason } = self.policy.authorize(&req.remote_host, origin.as_deref()) {
            return Err(BridgeError::Denied(reason));
        }
        self.translator
            .engine()
            .check_access(&req.remote_host, &req.remote_host, origin.as_deref())?;

        // Dispatching
        let params = RequestTranslator::build_params(&req.query);
        match req.method {
            HttpMethod::Get => self.translator.handle_get(&req.uri, &req.path, &params).await,
            HttpMethod::Post => {
                self.translator
                    .handle_post(&req.uri, &req.path, req.body, BODY_CHARSET, &params)
                    .await
            }
            HttpMethod::Other(m) => Err(BridgeError::Internal(format!("method {m} reached dispatch"))),
        }
    }

    fn fault(&self, cause: BridgeError) -> EngineCallResult {
        match &cause {
            BridgeError::Denied(reason) => self.log.info(&format!("access denied: {reason}")),
            BridgeError::Internal(_) => self.log.error("internal bridge error", Some(&cause)),
            other if self.log.is_debug() => self.log.debug(&format!("engine fault: {other}")),
            _ => {}
        }
        let result = self.translator.translate_fault(cause);
        let error_type = result
            .payload
            .get("error_type")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        self.metrics.faults.inc(&[("error_type", error_type.as_str())]);
        result
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
