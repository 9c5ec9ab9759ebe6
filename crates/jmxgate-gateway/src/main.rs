//! jmxgate gateway binary.
//!
//! - Config from `JMXGATE_CONFIG` (default `jmxgate.yaml`)
//! - Management bridge under `gateway.mount`, backed by the echo engine
//! - Graceful shutdown on Ctrl-C

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use jmxgate_core::error::{BridgeError, Result};
use jmxgate_gateway::{app_state, config, router, services::EchoEngine};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("JMXGATE_CONFIG").unwrap_or_else(|_| "jmxgate.yaml".to_string());
    let cfg = config::load_or_default(&path)?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| BridgeError::Config(format!("gateway.listen must be a valid SocketAddr: {e}")))?;

    let engine_cfg = config::EngineConfig::resolve(&cfg)?;
    let engine = Arc::new(EchoEngine::new(&engine_cfg));
    let mount = cfg.gateway.mount.clone();

    let state = app_state::AppState::new(cfg, engine_cfg, engine);
    let app = router::build_router(state);

    tracing::info!(%listen, %mount, "jmxgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| BridgeError::Config(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BridgeError::Internal(format!("server failed: {e}")))?;

    tracing::info!("jmxgate-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl_c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
