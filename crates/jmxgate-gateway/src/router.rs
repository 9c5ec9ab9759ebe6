//! Axum router wiring.
//!
//! - `/healthz`, `/metrics` : ops endpoints
//! - `{mount}/*`            : management bridge (GET/POST), 405 otherwise

use axum::{middleware, routing::any, routing::get, Router};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    let mount = state.cfg().gateway.mount.clone();
    let max_body = state.cfg().gateway.max_body_bytes;

    // Layers run bottom-up: body buffering wraps the bridge.
    let bridge = Router::new()
        .route("/", any(http::method_not_allowed))
        .route("/*rest", any(http::method_not_allowed))
        .layer(middleware::from_fn_with_state(state.clone(), http::bridge))
        .layer(middleware::from_fn_with_state(max_body, http::buffer_body));

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .nest(&mount, bridge)
        .with_state(state)
}
