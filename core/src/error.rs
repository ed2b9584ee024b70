//! Errors defined by the shim itself.
//!
//! # Design
//! Transport failures are never wrapped: `request` hands back whatever error
//! type the transport produces. The only error owned by this crate is the one
//! raised when a verb name does not map to a known `Method`.

use thiserror::Error;

/// A method name that is not one of the supported HTTP verbs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);
