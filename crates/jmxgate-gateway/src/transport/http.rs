//! HTTP transport glue (axum).
//!
//! Responsibilities:
//! - Buffer POST bodies before the bridge runs (`buffer_body`)
//! - Snapshot an axum request into an [`InboundRequest`]
//! - Run the bridge as middleware; declined requests continue to the next stage
//! - Render a result as exactly one JSON response

use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, OriginalUri, Request, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use jmxgate_core::engine::{fault_payload, EngineCallResult, JSON_CONTENT_TYPE};
use jmxgate_core::error::BridgeError;
use jmxgate_core::request::{HttpMethod, InboundRequest};

use crate::app_state::AppState;

/// Body collected by [`buffer_body`], stored in request extensions.
#[derive(Debug, Clone)]
pub struct BufferedBody(pub Bytes);

/// Collect POST bodies up to `limit` bytes. Other methods pass through.
pub async fn buffer_body(State(limit): State<usize>, req: Request, next: Next) -> Response {
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => {
            parts.extensions.insert(BufferedBody(bytes));
            next.run(Request::from_parts(parts, Body::empty())).await
        }
        Err(e) => {
            tracing::debug!(error = %e, limit, "request body rejected");
            let cause = BridgeError::MalformedRequest(format!(
                "request body unreadable or larger than {limit} bytes"
            ));
            let mut payload = fault_payload(&cause);
            payload["status"] = StatusCode::PAYLOAD_TOO_LARGE.as_u16().into();
            render(&EngineCallResult::new(payload))
        }
    }
}

/// Bridge middleware. GET/POST always end here with one response.
pub async fn bridge(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let inbound = snapshot(&req);
    match app.bridge().handle(inbound).await.into_result() {
        Some(result) => render(&result),
        None => next.run(req).await,
    }
}

/// Next stage for requests the bridge declined.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, POST")]).into_response()
}

/// Immutable snapshot of the parts the bridge needs.
pub fn snapshot(req: &Request) -> InboundRequest {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|o| o.0.to_string())
        .unwrap_or_else(|| req.uri().to_string());

    let query = req
        .uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let remote_host = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_default();

    let body = req.extensions().get::<BufferedBody>().map(|b| b.0.clone());

    InboundRequest::new(HttpMethod::parse(req.method().as_str()), uri, req.uri().path())
        .with_query(query)
        .with_remote_host(remote_host)
        .with_origin(header_string(req.headers(), header::ORIGIN))
        .with_referer(header_string(req.headers(), header::REFERER))
        .with_body(body)
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// Status from the payload, fixed JSON content type, serialized body.
pub fn render(result: &EngineCallResult) -> Response {
    let status = StatusCode::from_u16(result.status_code()).unwrap_or(StatusCode::OK);
    (
        status,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        result.to_json_string(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;
    use serde_json::json;

    #[test]
    fn snapshot_reads_query_headers_and_peer() {
        let mut req = HttpRequest::builder()
            .method("GET")
            .uri("/read/java.lang:type=Memory?p=1&q=x&p=2&p=a%20b")
            .header("origin", "https://console.acme.io")
            .header("referer", "https://console.acme.io/page")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo("10.0.0.9:51000".parse::<SocketAddr>().unwrap()));
        req.extensions_mut()
            .insert(OriginalUri("/jolokia/read/java.lang:type=Memory?p=1&q=x&p=2&p=a%20b".parse().unwrap()));

        let s = snapshot(&req);
        assert_eq!(s.method, HttpMethod::Get);
        assert_eq!(s.path, "/read/java.lang:type=Memory");
        assert!(s.uri.starts_with("/jolokia/read/"));
        assert_eq!(s.remote_host, "10.0.0.9");
        assert_eq!(s.origin.as_deref(), Some("https://console.acme.io"));
        assert_eq!(s.referer.as_deref(), Some("https://console.acme.io/page"));
        let names: Vec<_> = s.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(names, vec!["p=1", "q=x", "p=2", "p=a b"]);
        assert!(s.body.is_none());
    }

    #[tokio::test]
    async fn render_uses_payload_status_and_json_type() {
        let r = render(&EngineCallResult::new(json!({"status": 404, "error": "gone"})));
        assert_eq!(r.status(), StatusCode::NOT_FOUND);
        assert_eq!(r.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        let bytes = axum::body::to_bytes(r.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v, json!({"status": 404, "error": "gone"}));
    }

    #[test]
    fn render_defaults_to_200() {
        let r = render(&EngineCallResult::new(json!({"value": 1})));
        assert_eq!(r.status(), StatusCode::OK);
    }
}
