//! Shared application state for the jmxgate gateway.
//!
//! Built once at startup: the restrictor is resolved, the bridge handler
//! is wired to the engine, and everything is shared behind one `Arc`.

use std::sync::Arc;

use jmxgate_core::engine::ManagementEngine;
use jmxgate_core::log::LogSink;
use jmxgate_core::restrictor::Restrictor;

use crate::bridge::{BridgeHandler, RequestTranslator};
use crate::config::{BridgeConfig, EngineConfig};
use crate::obs::{BridgeMetrics, TracingLogSink};
use crate::policy::{create_restrictor, AccessPolicy};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: BridgeConfig,
    bridge: BridgeHandler,
    metrics: Arc<BridgeMetrics>,
}

impl AppState {
    /// Resolve the restrictor from `engine_cfg.policy_location` and wire the bridge.
    pub fn new(cfg: BridgeConfig, engine_cfg: EngineConfig, engine: Arc<dyn ManagementEngine>) -> Self {
        let restrictor = create_restrictor(engine_cfg.policy_location.as_deref(), &TracingLogSink);
        Self::assemble(cfg, engine_cfg, engine, restrictor)
    }

    /// Use a caller-supplied restrictor; the configured location is ignored.
    pub fn with_restrictor(
        cfg: BridgeConfig,
        engine_cfg: EngineConfig,
        engine: Arc<dyn ManagementEngine>,
        restrictor: Arc<dyn Restrictor>,
    ) -> Self {
        TracingLogSink.info(&format!("Using restrictor {restrictor}"));
        Self::assemble(cfg, engine_cfg, engine, restrictor)
    }

    fn assemble(
        cfg: BridgeConfig,
        engine_cfg: EngineConfig,
        engine: Arc<dyn ManagementEngine>,
        restrictor: Arc<dyn Restrictor>,
    ) -> Self {
        let metrics = Arc::new(BridgeMetrics::default());
        tracing::info!(
            engine = %engine.name(),
            agent_id = %engine_cfg.agent_id,
            restrictor = %restrictor,
            "bridge ready"
        );
        let log: Arc<dyn LogSink> = Arc::new(TracingLogSink);
        let bridge = BridgeHandler::new(
            AccessPolicy::new(restrictor),
            RequestTranslator::new(engine, Arc::clone(&log)),
            log,
            Arc::clone(&metrics),
        );

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                bridge,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &BridgeConfig {
        &self.inner.cfg
    }

    pub fn bridge(&self) -> &BridgeHandler {
        &self.inner.bridge
    }

    pub fn metrics(&self) -> Arc<BridgeMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
