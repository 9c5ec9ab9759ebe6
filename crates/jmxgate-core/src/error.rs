//! Shared error type across jmxgate crates.

use thiserror::Error;

/// Client-facing fault codes (stable API, rendered as `error_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// Access policy or engine rejected the caller.
    AccessDenied,
    /// Request shape is unusable (e.g. POST without a body).
    MalformedRequest,
    /// Target of the call does not exist.
    NotFound,
    /// Engine failed while executing the call.
    EngineFault,
    /// Bridge-internal inconsistency.
    Internal,
}

impl FaultCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::AccessDenied => "AccessDenied",
            FaultCode::MalformedRequest => "MalformedRequest",
            FaultCode::NotFound => "NotFound",
            FaultCode::EngineFault => "EngineFault",
            FaultCode::Internal => "InternalError",
        }
    }

    /// HTTP-style status an engine assigns by default.
    pub fn status(self) -> u16 {
        match self {
            FaultCode::AccessDenied => 403,
            FaultCode::MalformedRequest => 400,
            FaultCode::NotFound => 404,
            FaultCode::EngineFault | FaultCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core, gateway and engines.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("access denied: {0}")]
    Denied(String),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{error_type}: {message}")]
    Engine { error_type: String, message: String },
    /// Envelope raised by an invocation boundary around the real failure.
    #[error("{context}")]
    Invocation {
        context: String,
        #[source]
        target: Box<BridgeError>,
    },
    #[error("internal: {0}")]
    Internal(String),
    #[error("config: {0}")]
    Config(String),
}

impl BridgeError {
    /// Wrap `target` in an invocation envelope.
    pub fn invocation(context: impl Into<String>, target: BridgeError) -> Self {
        BridgeError::Invocation {
            context: context.into(),
            target: Box::new(target),
        }
    }

    /// Engine failure with a free-form type tag.
    pub fn engine(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeError::Engine {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    /// Peel every invocation envelope and return the real cause.
    pub fn innermost(self) -> BridgeError {
        let mut cur = self;
        while let BridgeError::Invocation { target, .. } = cur {
            cur = *target;
        }
        cur
    }

    /// Map internal error to a stable client-facing code.
    pub fn fault_code(&self) -> FaultCode {
        match self {
            BridgeError::Denied(_) => FaultCode::AccessDenied,
            BridgeError::MalformedRequest(_) => FaultCode::MalformedRequest,
            BridgeError::NotFound(_) => FaultCode::NotFound,
            BridgeError::Engine { .. } => FaultCode::EngineFault,
            BridgeError::Invocation { target, .. } => target.fault_code(),
            BridgeError::Internal(_) | BridgeError::Config(_) => FaultCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn innermost_peels_nested_envelopes() {
        let err = BridgeError::invocation(
            "outer",
            BridgeError::invocation("inner", BridgeError::NotFound("java.lang:type=Nope".into())),
        );
        match err.innermost() {
            BridgeError::NotFound(m) => assert_eq!(m, "java.lang:type=Nope"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn innermost_is_identity_without_envelope() {
        let err = BridgeError::Denied("host".into()).innermost();
        assert!(matches!(err, BridgeError::Denied(_)));
    }

    #[test]
    fn envelope_reports_target_code() {
        let err = BridgeError::invocation("call", BridgeError::Denied("x".into()));
        assert_eq!(err.fault_code(), FaultCode::AccessDenied);
        assert_eq!(err.fault_code().status(), 403);
    }

    #[test]
    fn engine_error_display() {
        let err = BridgeError::engine("AttributeNotFound", "No attribute Foo");
        assert_eq!(err.to_string(), "AttributeNotFound: No attribute Foo");
        assert_eq!(err.fault_code().as_str(), "EngineFault");
    }
}
