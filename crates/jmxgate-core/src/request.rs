//! Inbound request snapshot.
//!
//! Built once by the transport and handed to the bridge by value; nothing
//! downstream mutates it.

use bytes::Bytes;

/// Request method as seen by the bridge. Only GET and POST are acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Other(String),
}

impl HttpMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            other => HttpMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Other(m) => m,
        }
    }
}

/// Immutable snapshot of one HTTP request.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: HttpMethod,
    /// Full request URI as received (mount prefix included).
    pub uri: String,
    /// Path with the mount prefix removed.
    pub path: String,
    /// Query parameters in arrival order; names may repeat.
    pub query: Vec<(String, String)>,
    /// Immediate client address.
    pub remote_host: String,
    pub origin: Option<String>,
    pub referer: Option<String>,
    /// Buffered body. `None` unless a buffering layer ran first.
    pub body: Option<Bytes>,
}

impl InboundRequest {
    pub fn new(method: HttpMethod, uri: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            path: path.into(),
            query: Vec::new(),
            remote_host: String::new(),
            origin: None,
            referer: None,
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_remote_host(mut self, host: impl Into<String>) -> Self {
        self.remote_host = host.into();
        self
    }

    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_referer(mut self, referer: Option<String>) -> Self {
        self.referer = referer;
        self
    }

    pub fn with_body(mut self, body: Option<Bytes>) -> Self {
        self.body = body;
        self
    }
}
