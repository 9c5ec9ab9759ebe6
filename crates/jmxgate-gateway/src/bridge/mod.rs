//! Request bridge: access check, engine dispatch, fault translation.

pub mod handler;
pub mod translator;

pub use handler::{BridgeHandler, Dispatch};
pub use translator::{RequestTranslator, BODY_CHARSET};
