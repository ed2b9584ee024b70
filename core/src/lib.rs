//! Blocking HTTPS request helpers.
//!
//! # Overview
//! `request` performs one HTTP round trip on a freshly opened secure
//! connection and returns the raw response. `get`, `post` and `put` are
//! fixed-method shortcuts over it.
//!
//! # Design
//! - `RequestShim` is stateless apart from its `Transport`.
//! - Each call opens exactly one connection and sends exactly one request.
//! - Responses and errors pass through untouched; a 500 is a response, and a
//!   failed handshake is the transport's own error value.
//! - The free functions use `HttpsTransport`; inject another transport via
//!   `RequestShim::new`.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;

pub use client::{get, post, put, request, ErrorOf, RequestShim, ResponseOf};
pub use error::UnknownMethod;
pub use http::{Method, Request};
pub use transport::{Connection, HttpsConnection, HttpsTransport, Scheme, Transport};
